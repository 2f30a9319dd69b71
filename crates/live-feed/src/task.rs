//! Background task driving one live feed.

use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use kitchen_client::KitchenClient;

use crate::event::{FeedDescriptor, FeedEvent};
use crate::notice::{Notice, NoticeSink};
use crate::options::FeedOptions;
use crate::state::{ConnectionState, FeedView};
use crate::transport::{self, FeedStream};

const SNAPSHOT_ERROR_TITLE: &str = "Error";

/// How a stream session ended.
enum Session {
    /// The server closed the stream or the transport failed.
    Closed,
    /// The owner asked the feed to stop.
    Stopped,
}

pub(crate) struct FeedTask<E: FeedEvent> {
    pub(crate) client: KitchenClient,
    pub(crate) descriptor: FeedDescriptor,
    pub(crate) stream_url: Url,
    pub(crate) options: FeedOptions,
    pub(crate) notices: Arc<dyn NoticeSink>,
    pub(crate) view: watch::Sender<FeedView<E>>,
}

impl<E: FeedEvent> FeedTask<E> {
    /// Load the snapshot and run the stream loop concurrently until shutdown.
    ///
    /// The snapshot and the stream are independent: events that arrive before
    /// the snapshot are merged into the empty collection and a successful
    /// snapshot then replaces it.
    pub(crate) async fn run(self, shutdown: watch::Receiver<bool>) {
        let snapshot = async {
            self.load_snapshot().await;
            std::future::pending::<()>().await
        };

        tokio::select! {
            _ = snapshot => {}
            _ = self.stream_loop(shutdown) => {}
        }
        debug!("[{}] Feed stopped", self.descriptor.label);
    }

    async fn load_snapshot(&self) {
        let label = self.descriptor.label;
        match self
            .client
            .fetch_snapshot::<E>(self.descriptor.snapshot_path)
            .await
        {
            Ok(items) => {
                debug!("[{}] Snapshot loaded with {} items", label, items.len());
                self.view.send_modify(|view| {
                    view.collection.replace(items);
                    view.loaded = true;
                });
            }
            Err(e) => {
                warn!("[{}] Snapshot request failed: {}", label, e);
                self.view.send_modify(|view| view.loaded = true);
                self.notices.emit(Notice::destructive(
                    SNAPSHOT_ERROR_TITLE,
                    self.descriptor.snapshot_error,
                ));
            }
        }
    }

    async fn stream_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let label = self.descriptor.label;
        loop {
            if *shutdown.borrow() {
                return;
            }

            self.set_connection(ConnectionState::Connecting);
            let connected = tokio::select! {
                result = transport::connect(&self.stream_url, self.options.connect_timeout) => result,
                _ = stopped(&mut shutdown) => return,
            };

            match connected {
                Ok(stream) => {
                    info!("[{}] Stream connected to {}", label, self.stream_url);
                    self.set_connection(ConnectionState::Open);
                    if let Session::Stopped = self.pump(stream, &mut shutdown).await {
                        return;
                    }
                    info!("[{}] Stream closed", label);
                }
                Err(e) => warn!("[{}] Stream connection failed: {}", label, e),
            }

            self.set_connection(ConnectionState::ClosedReconnecting);
            debug!(
                "[{}] Reconnecting in {:?}",
                label, self.options.reconnect_delay
            );
            tokio::select! {
                _ = tokio::time::sleep(self.options.reconnect_delay) => {}
                _ = stopped(&mut shutdown) => return,
            }
        }
    }

    async fn pump(&self, mut stream: FeedStream, shutdown: &mut watch::Receiver<bool>) -> Session {
        loop {
            tokio::select! {
                message = stream.next() => match message {
                    Some(Ok(Message::Text(text))) => self.apply(text.as_str()),
                    Some(Ok(Message::Close(frame))) => {
                        debug!("[{}] Close frame received: {:?}", self.descriptor.label, frame);
                        return Session::Closed;
                    }
                    // Binary payloads are not part of the protocol; ping/pong is
                    // answered by tungstenite.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("[{}] Stream error: {}", self.descriptor.label, e);
                        return Session::Closed;
                    }
                    None => return Session::Closed,
                },
                _ = stopped(shutdown) => {
                    if let Err(e) = stream.close(None).await {
                        debug!("[{}] Close on shutdown failed: {}", self.descriptor.label, e);
                    }
                    return Session::Stopped;
                }
            }
        }
    }

    /// Merge one pushed payload. Malformed payloads are dropped.
    fn apply(&self, payload: &str) {
        let event: E = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    "[{}] Ignoring malformed event: {}",
                    self.descriptor.label, e
                );
                return;
            }
        };

        let notice = if self.descriptor.announce_events {
            event.notice()
        } else {
            None
        };

        self.view.send_modify(|view| {
            let outcome = view.collection.merge(event);
            debug!("[{}] Event merged: {:?}", self.descriptor.label, outcome);
        });

        if let Some(notice) = notice {
            self.notices.emit(notice);
        }
    }

    fn set_connection(&self, state: ConnectionState) {
        self.view.send_if_modified(|view| {
            if view.connection == state {
                false
            } else {
                view.connection = state;
                true
            }
        });
    }
}

/// Resolves once shutdown is requested or the handle is gone.
async fn stopped(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
