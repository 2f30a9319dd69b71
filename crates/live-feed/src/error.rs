//! Error types for the live feed crate.
//!
//! Only feed construction can fail from the caller's point of view; transport
//! errors are handled inside the feed task and show up as connection state.

use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Result type alias for live feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The client origin could not be parsed as a URL
    #[error("Invalid origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    /// Only http(s) and ws(s) origins can be upgraded to a push stream
    #[error("Unsupported origin scheme: {0}")]
    UnsupportedScheme(String),

    /// WebSocket handshake or I/O error
    #[error("WebSocket error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("Connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),
}
