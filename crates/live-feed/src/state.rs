use std::fmt;

use serde::Serialize;

use crate::event::FeedEvent;
use crate::merge::{FeedCollection, MergePolicy};

/// Health of a feed's push stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// A handshake is in flight.
    #[default]
    Connecting,
    /// The stream is open and delivering events.
    Open,
    /// The stream closed or failed; a retry is scheduled.
    ClosedReconnecting,
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::ClosedReconnecting => "closed_reconnecting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a feed subscriber sees: the merged collection and stream health.
#[derive(Debug, Clone)]
pub struct FeedView<E> {
    pub(crate) collection: FeedCollection<E>,
    pub(crate) loaded: bool,
    pub(crate) connection: ConnectionState,
}

impl<E: FeedEvent> FeedView<E> {
    pub(crate) fn new(policy: MergePolicy) -> Self {
        Self {
            collection: FeedCollection::new(policy),
            loaded: false,
            connection: ConnectionState::Connecting,
        }
    }

    pub fn items(&self) -> &[E] {
        self.collection.items()
    }

    pub fn collection(&self) -> &FeedCollection<E> {
        &self.collection
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// True once the snapshot request has finished, whether or not it
    /// succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }
}
