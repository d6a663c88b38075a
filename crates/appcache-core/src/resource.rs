//! Navigation resource descriptors.

use url::Url;

use crate::ids::{CacheId, HostId};

/// An outgoing resource fetch the host stamps with its identity.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Request URL.
    pub url: Url,
    /// HTTP method as supplied by the loader.
    pub method: String,
    /// Host handle attributing this fetch to a cache host, once stamped.
    pub host_id: Option<HostId>,
}

impl ResourceRequest {
    /// Create a new request.
    pub fn new(url: Url, method: impl Into<String>) -> Self {
        Self {
            url,
            method: method.into(),
            host_id: None,
        }
    }

    /// Stamp the request with a host handle.
    pub fn set_host_id(&mut self, host_id: HostId) {
        self.host_id = Some(host_id);
    }
}

/// The main-resource response descriptor captured once per navigation.
#[derive(Debug, Clone)]
pub struct ResourceResponse {
    /// Response URL.
    pub url: Url,
    /// Cache the response was served from, or `CacheId::NONE`.
    pub cache_id: CacheId,
    /// Manifest URL governing the cache the response came from, if any.
    pub manifest_url: Option<Url>,
}

impl ResourceResponse {
    /// Create a response descriptor with no cache association.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            cache_id: CacheId::NONE,
            manifest_url: None,
        }
    }

    /// Set the cache the response was served from.
    pub fn with_cache(mut self, cache_id: CacheId, manifest_url: Url) -> Self {
        self.cache_id = cache_id;
        self.manifest_url = Some(manifest_url);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_stamping() {
        let url = Url::parse("http://example.com/").unwrap();
        let mut request = ResourceRequest::new(url, "GET");
        assert!(request.host_id.is_none());
        request.set_host_id(HostId::new(3));
        assert_eq!(request.host_id, Some(HostId::new(3)));
    }

    #[test]
    fn test_response_cache_association() {
        let url = Url::parse("http://example.com/").unwrap();
        let manifest = Url::parse("http://example.com/app.manifest").unwrap();
        let response = ResourceResponse::new(url.clone());
        assert!(response.cache_id.is_none());

        let response = ResourceResponse::new(url).with_cache(CacheId::new(9), manifest.clone());
        assert_eq!(response.cache_id, CacheId::new(9));
        assert_eq!(response.manifest_url, Some(manifest));
    }
}
