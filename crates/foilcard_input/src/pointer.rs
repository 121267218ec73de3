//! Pointer event source
//!
//! [`PointerHub`] stands in for the window's global listener list. Hosts
//! feed it raw pointer events with [`PointerHub::dispatch`]; consumers
//! subscribe with a kind mask and, optionally, a hit region that the event
//! position must fall inside.
//!
//! The hub is a cheap `Rc` handle. Everything runs on one thread, so handlers
//! may subscribe or unsubscribe while an event is being dispatched.

use std::cell::RefCell;
use std::rc::Rc;
use bitflags::bitflags;
use foilcard_math::Vec2;
use slotmap::{new_key_type, SlotMap};

bitflags! {
    /// Pointer event kinds a subscription listens to
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerKinds: u8 {
        /// Button pressed
        const DOWN = 1 << 0;
        /// Pointer moved
        const MOVE = 1 << 1;
        /// Button released
        const UP = 1 << 2;
        /// Every kind
        const ALL = Self::DOWN.bits() | Self::MOVE.bits() | Self::UP.bits();
    }
}

/// A raw pointer event in screen pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

impl PointerEvent {
    /// The kind flag for this event
    pub fn kind(&self) -> PointerKinds {
        match self {
            PointerEvent::Down(_) => PointerKinds::DOWN,
            PointerEvent::Move(_) => PointerKinds::MOVE,
            PointerEvent::Up(_) => PointerKinds::UP,
        }
    }

    /// Pointer position when the event happened
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

new_key_type! {
    /// Key of a subscription in a [`PointerHub`]
    pub struct SubscriptionKey;
}

type SharedHandler = Rc<RefCell<dyn FnMut(&PointerEvent)>>;
type HitRegion = Rc<dyn Fn(Vec2) -> bool>;

struct Subscription {
    kinds: PointerKinds,
    region: Option<HitRegion>,
    handler: SharedHandler,
}

/// Injected pointer event source with keyed subscriptions
#[derive(Clone, Default)]
pub struct PointerHub {
    subscriptions: Rc<RefCell<SlotMap<SubscriptionKey, Subscription>>>,
}

impl PointerHub {
    /// Create a hub with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event of the given kinds, wherever it happens
    pub fn subscribe<F>(&self, kinds: PointerKinds, handler: F) -> SubscriptionKey
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        self.insert(kinds, None, handler)
    }

    /// Subscribe to events of the given kinds whose position satisfies `region`
    pub fn subscribe_within<R, F>(
        &self,
        kinds: PointerKinds,
        region: R,
        handler: F,
    ) -> SubscriptionKey
    where
        R: Fn(Vec2) -> bool + 'static,
        F: FnMut(&PointerEvent) + 'static,
    {
        let region: HitRegion = Rc::new(region);
        self.insert(kinds, Some(region), handler)
    }

    fn insert<F>(
        &self,
        kinds: PointerKinds,
        region: Option<HitRegion>,
        handler: F,
    ) -> SubscriptionKey
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        let handler: SharedHandler = Rc::new(RefCell::new(handler));
        self.subscriptions.borrow_mut().insert(Subscription { kinds, region, handler })
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        self.subscriptions.borrow_mut().remove(key).is_some()
    }

    /// Check whether a subscription is still registered
    pub fn is_subscribed(&self, key: SubscriptionKey) -> bool {
        self.subscriptions.borrow().contains_key(key)
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Deliver an event to every matching subscriber.
    ///
    /// Subscribers removed by an earlier handler during the same dispatch are
    /// skipped. Returns the number of handlers invoked.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        let kind = event.kind();
        let position = event.position();

        // Snapshot first so handlers can touch the hub while we iterate
        let targets: Vec<(SubscriptionKey, Option<HitRegion>, SharedHandler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(_, sub)| sub.kinds.intersects(kind))
            .map(|(key, sub)| (key, sub.region.clone(), sub.handler.clone()))
            .collect();

        let mut delivered = 0;
        for (key, region, handler) in targets {
            if !self.is_subscribed(key) {
                continue;
            }
            if let Some(region) = region {
                if !region(position) {
                    continue;
                }
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(&event);
                    delivered += 1;
                }
                Err(_) => log::warn!("Skipping re-entrant pointer dispatch of {:?}", kind),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_event_kind_and_position() {
        let e = PointerEvent::Up(Vec2::new(1.0, 2.0));
        assert_eq!(e.kind(), PointerKinds::UP);
        assert_eq!(e.position(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_dispatch_respects_kind_mask() {
        let hub = PointerHub::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        hub.subscribe(PointerKinds::MOVE | PointerKinds::UP, move |_| c.set(c.get() + 1));

        assert_eq!(hub.dispatch(PointerEvent::Down(Vec2::ZERO)), 0);
        assert_eq!(hub.dispatch(PointerEvent::Move(Vec2::ZERO)), 1);
        assert_eq!(hub.dispatch(PointerEvent::Up(Vec2::ZERO)), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_dispatch_respects_hit_region() {
        let hub = PointerHub::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        hub.subscribe_within(
            PointerKinds::DOWN,
            |p: Vec2| p.x >= 0.0 && p.x <= 10.0,
            move |_| h.set(h.get() + 1),
        );

        hub.dispatch(PointerEvent::Down(Vec2::new(5.0, 0.0)));
        hub.dispatch(PointerEvent::Down(Vec2::new(50.0, 0.0)));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let hub = PointerHub::new();
        let key = hub.subscribe(PointerKinds::ALL, |_| {});
        assert_eq!(hub.subscription_count(), 1);
        assert!(hub.unsubscribe(key));
        assert!(!hub.unsubscribe(key));
        assert_eq!(hub.subscription_count(), 0);
        assert_eq!(hub.dispatch(PointerEvent::Move(Vec2::ZERO)), 0);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_skips_removed_handler() {
        let hub = PointerHub::new();
        let second_called = Rc::new(Cell::new(false));
        let victim: Rc<Cell<Option<SubscriptionKey>>> = Rc::new(Cell::new(None));

        let hub_handle = hub.clone();
        let v = victim.clone();
        hub.subscribe(PointerKinds::MOVE, move |_| {
            if let Some(key) = v.get() {
                hub_handle.unsubscribe(key);
            }
        });
        let s = second_called.clone();
        let key = hub.subscribe(PointerKinds::MOVE, move |_| s.set(true));
        victim.set(Some(key));

        assert_eq!(hub.dispatch(PointerEvent::Move(Vec2::ZERO)), 1);
        assert!(!second_called.get());
        assert_eq!(hub.subscription_count(), 1);
    }

    #[test]
    fn test_subscribe_during_dispatch() {
        let hub = PointerHub::new();
        let hub_handle = hub.clone();
        hub.subscribe(PointerKinds::DOWN, move |_| {
            hub_handle.subscribe(PointerKinds::UP, |_| {});
        });

        hub.dispatch(PointerEvent::Down(Vec2::ZERO));
        assert_eq!(hub.subscription_count(), 2);
    }

    #[test]
    fn test_reentrant_dispatch_is_skipped() {
        let hub = PointerHub::new();
        let depth = Rc::new(Cell::new(0));
        let hub_handle = hub.clone();
        let d = depth.clone();
        hub.subscribe(PointerKinds::MOVE, move |e| {
            d.set(d.get() + 1);
            // Re-dispatching to ourselves must not recurse or panic
            hub_handle.dispatch(*e);
        });

        assert_eq!(hub.dispatch(PointerEvent::Move(Vec2::ZERO)), 1);
        assert_eq!(depth.get(), 1);
    }
}
