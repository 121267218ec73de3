//! Background texture loading
//!
//! [`FileTextureLoader`] keeps a worker thread that reads card images from
//! local paths or fetches them over http(s), answering each request through
//! its [`TextureSink`]. Decoding is left to whatever renderer consumes
//! [`TextureData`].

use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread;

use foilcard_render::{TextureError, TextureLoader, TextureSink};

/// Raw image bytes plus where they came from
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Source string the texture was requested with
    pub source: String,
    /// Encoded image bytes
    pub bytes: Arc<[u8]>,
}

impl TextureData {
    pub fn new(source: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            source: source.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the encoded image in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where a source string points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Path,
    Http,
    Unsupported,
}

impl SourceKind {
    fn of(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            SourceKind::Http
        } else if source.contains("://") {
            SourceKind::Unsupported
        } else {
            SourceKind::Path
        }
    }
}

struct LoadRequest {
    source: String,
    sink: TextureSink<TextureData>,
}

/// Reads textures from local paths or http(s) URLs on a worker thread
///
/// Other URL schemes are rejected immediately with
/// [`TextureError::Unsupported`].
pub struct FileTextureLoader {
    sender: Sender<LoadRequest>,
}

impl FileTextureLoader {
    /// Create a loader with its own worker thread
    ///
    /// The worker exits once the loader is dropped and pending requests are served.
    pub fn new() -> Self {
        let (sender, requests) = channel::<LoadRequest>();

        thread::spawn(move || {
            let mut client: Option<reqwest::blocking::Client> = None;
            while let Ok(request) = requests.recv() {
                let result = match SourceKind::of(&request.source) {
                    SourceKind::Http => fetch(&mut client, &request.source),
                    _ => std::fs::read(&request.source).map_err(TextureError::from),
                };
                let result = result.map(|bytes| TextureData::new(request.source.clone(), bytes));
                request.sink.resolve(result);
            }
        });

        Self { sender }
    }
}

/// Download `url`, building the http client on first use
fn fetch(
    client: &mut Option<reqwest::blocking::Client>,
    url: &str,
) -> Result<Vec<u8>, TextureError> {
    let failed = |e: reqwest::Error| TextureError::Failed(format!("{}: {}", url, e));

    if client.is_none() {
        *client = Some(reqwest::blocking::Client::builder().build().map_err(failed)?);
    }
    let Some(client) = client.as_ref() else {
        return Err(TextureError::Failed("http client unavailable".to_string()));
    };

    let response = client.get(url).send().and_then(|r| r.error_for_status()).map_err(failed)?;
    let bytes = response.bytes().map_err(failed)?;
    log::debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

impl Default for FileTextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoader<TextureData> for FileTextureLoader {
    fn load(&mut self, source: &str, sink: TextureSink<TextureData>) {
        if SourceKind::of(source) == SourceKind::Unsupported {
            sink.resolve(Err(TextureError::Unsupported(source.to_string())));
            return;
        }

        let request = LoadRequest {
            source: source.to_string(),
            sink,
        };
        if let Err(err) = self.sender.send(request) {
            // Worker is gone; answer on its behalf
            log::warn!("Texture worker unavailable for '{}'", err.0.source);
            let stopped = TextureError::Failed("texture worker stopped".to_string());
            err.0.sink.resolve(Err(stopped));
        }
    }
}
