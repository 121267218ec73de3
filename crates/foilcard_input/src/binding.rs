//! Scoped pointer subscriptions for a tilt controller

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use foilcard_math::Vec2;
use crate::{PointerHub, PointerKinds, SubscriptionKey, TiltController};

/// The three subscriptions that drive one [`TiltController`] from a hub.
///
/// Pointer-down only counts inside the card's hit region; move and up are
/// global so a drag keeps working after the pointer leaves the card.
/// Subscriptions are removed by [`release`](Self::release) or on drop,
/// whichever comes first.
pub struct PointerBinding {
    hub: PointerHub,
    keys: Vec<SubscriptionKey>,
}

impl PointerBinding {
    /// Subscribe `controller` to `hub`.
    ///
    /// Handlers hold a weak reference, so a controller dropped without
    /// releasing the binding is simply no longer driven.
    pub fn attach<R>(
        controller: &Rc<RefCell<TiltController>>,
        hub: &PointerHub,
        hit_region: R,
    ) -> Self
    where
        R: Fn(Vec2) -> bool + 'static,
    {
        let down = Rc::downgrade(controller);
        let moved = Rc::downgrade(controller);
        let up = Rc::downgrade(controller);

        let keys = vec![
            hub.subscribe_within(PointerKinds::DOWN, hit_region, move |event| {
                with_controller(&down, |c| c.on_pointer_down(event.position()));
            }),
            hub.subscribe(PointerKinds::MOVE, move |event| {
                with_controller(&moved, |c| c.on_pointer_move(event.position()));
            }),
            hub.subscribe(PointerKinds::UP, move |_| {
                with_controller(&up, |c| c.on_pointer_up());
            }),
        ];

        log::debug!("Pointer binding attached ({} subscriptions)", keys.len());

        Self {
            hub: hub.clone(),
            keys,
        }
    }

    /// Unsubscribe everything. Returns how many subscriptions were removed;
    /// later calls return zero.
    pub fn release(&mut self) -> usize {
        let removed = self
            .keys
            .drain(..)
            .filter(|key| self.hub.unsubscribe(*key))
            .count();
        if removed > 0 {
            log::debug!("Pointer binding released ({} subscriptions)", removed);
        }
        removed
    }

    /// True until released
    pub fn is_active(&self) -> bool {
        !self.keys.is_empty()
    }
}

impl Drop for PointerBinding {
    fn drop(&mut self) {
        self.release();
    }
}

fn with_controller(weak: &Weak<RefCell<TiltController>>, f: impl FnOnce(&mut TiltController)) {
    if let Some(controller) = weak.upgrade() {
        match controller.try_borrow_mut() {
            Ok(mut controller) => f(&mut controller),
            Err(_) => log::warn!("Tilt controller busy, pointer event dropped"),
        }
    }
}
