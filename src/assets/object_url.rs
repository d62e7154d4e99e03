use std::collections::HashMap;
use std::fmt;

/// Mime type the serialized logo is wrapped in.
pub const SVG_MIME: &str = "image/svg+xml";

/// Temporary dereferenceable handle to an in-memory [`Blob`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// The handle as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binary payload tagged with a mime type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// Mime type, e.g. [`SVG_MIME`].
    pub mime: String,
}

/// Registry of live object URLs.
///
/// Each URL is single-use: it is created for one decode and revoked when that decode
/// completes. The counters make leaks observable.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next_id: u64,
    live: HashMap<ObjectUrl, Blob>,
    created: u64,
    revoked: u64,
}

impl ObjectUrls {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and hand out a fresh URL for them.
    pub fn create(&mut self, bytes: Vec<u8>, mime: &str) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("blob:hero-reveal/{}", self.next_id));
        self.live.insert(
            url.clone(),
            Blob {
                bytes,
                mime: mime.to_owned(),
            },
        );
        self.created += 1;
        url
    }

    /// Look up a live URL.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.live.get(url)
    }

    /// Release a URL. Returns `false` if it was not live.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = self.live.remove(url).is_some();
        if removed {
            self.revoked += 1;
        }
        removed
    }

    /// Number of URLs created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total URLs ever created.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Total URLs ever revoked.
    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/object_url.rs"]
mod tests;
