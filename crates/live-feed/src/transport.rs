use std::time::Duration;

use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::error::{FeedError, Result};

pub(crate) type FeedStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Open one WebSocket session, bounded by `timeout`.
pub(crate) async fn connect(url: &Url, timeout: Duration) -> Result<FeedStream> {
    match tokio::time::timeout(timeout, connect_async(url.as_str())).await {
        Ok(Ok((stream, _response))) => Ok(stream),
        Ok(Err(e)) => Err(FeedError::Transport(e)),
        Err(_) => Err(FeedError::ConnectTimeout(timeout)),
    }
}
