use url::Url;

use crate::error::{FeedError, Result};

/// Push-stream URL for `path` on the same origin as `origin`.
///
/// `http` becomes `ws` and `https` becomes `wss`; host and port are kept and
/// any path, query or fragment on the origin is replaced.
pub fn stream_url(origin: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(origin).map_err(|source| FeedError::InvalidOrigin {
        origin: origin.to_string(),
        source,
    })?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(FeedError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(scheme)
        .map_err(|_| FeedError::UnsupportedScheme(url.scheme().to_string()))?;

    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
