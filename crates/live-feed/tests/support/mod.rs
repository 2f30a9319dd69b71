//! In-process kitchen backend serving one snapshot and a push stream.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};

use kitchen_client::{
    KitchenClient, NOTIFICATIONS_SNAPSHOT_PATH, NOTIFICATIONS_STREAM_PATH,
    PORTIONS_SNAPSHOT_PATH, PORTIONS_STREAM_PATH,
};
use kitchen_live_feed::{FeedEvent, FeedView};

pub const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub enum Frame {
    Text(String),
    Close,
}

/// How the snapshot endpoint answers.
#[derive(Clone)]
pub struct SnapshotReply {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Duration,
}

impl SnapshotReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: serde_json::json!({ "detail": "database unavailable" }),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct BackendState {
    snapshot: SnapshotReply,
    frames: broadcast::Sender<Frame>,
    connections: Arc<Mutex<Vec<Instant>>>,
    disconnects: Arc<AtomicUsize>,
}

pub struct FakeBackend {
    pub origin: String,
    state: BackendState,
}

impl FakeBackend {
    pub async fn start(snapshot: SnapshotReply) -> Self {
        let (frames, _) = broadcast::channel(64);
        let state = BackendState {
            snapshot,
            frames,
            connections: Arc::new(Mutex::new(Vec::new())),
            disconnects: Arc::new(AtomicUsize::new(0)),
        };

        let router = Router::new()
            .route(NOTIFICATIONS_SNAPSHOT_PATH, get(snapshot_handler))
            .route(PORTIONS_SNAPSHOT_PATH, get(snapshot_handler))
            .route(NOTIFICATIONS_STREAM_PATH, get(stream_handler))
            .route(PORTIONS_STREAM_PATH, get(stream_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            origin: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> KitchenClient {
        KitchenClient::new(&self.origin).unwrap()
    }

    pub fn push(&self, event: Value) {
        self.push_raw(&event.to_string());
    }

    pub fn push_raw(&self, text: &str) {
        self.state
            .frames
            .send(Frame::Text(text.to_string()))
            .expect("no open stream to push to");
    }

    /// Close every open stream from the server side.
    pub fn close_streams(&self) {
        let _ = self.state.frames.send(Frame::Close);
    }

    pub fn connections(&self) -> usize {
        self.state.connections.lock().unwrap().len()
    }

    pub fn connection_times(&self) -> Vec<Instant> {
        self.state.connections.lock().unwrap().clone()
    }

    pub fn disconnects(&self) -> usize {
        self.state.disconnects.load(Ordering::SeqCst)
    }
}

async fn snapshot_handler(State(state): State<BackendState>) -> impl IntoResponse {
    tokio::time::sleep(state.snapshot.delay).await;
    (state.snapshot.status, Json(state.snapshot.body.clone()))
}

async fn stream_handler(ws: WebSocketUpgrade, State(state): State<BackendState>) -> Response {
    // Subscribe before the upgrade completes so a client that sees the
    // handshake succeed never misses a pushed frame.
    let frames = state.frames.subscribe();
    state.connections.lock().unwrap().push(Instant::now());
    ws.on_upgrade(move |socket| stream_session(socket, frames, state))
}

async fn stream_session(
    mut socket: WebSocket,
    mut frames: broadcast::Receiver<Frame>,
    state: BackendState,
) {
    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Ok(Frame::Text(text)) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Ok(Frame::Close) => {
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
                Err(_) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    state.disconnects.fetch_add(1, Ordering::SeqCst);
}

/// Wait until the feed view satisfies `condition` and return a copy of it.
pub async fn wait_for_view<E: FeedEvent>(
    view: &mut watch::Receiver<FeedView<E>>,
    condition: impl FnMut(&FeedView<E>) -> bool,
) -> FeedView<E> {
    let seen = tokio::time::timeout(WAIT, view.wait_for(condition))
        .await
        .expect("feed view did not reach the expected state")
        .expect("feed task stopped");
    (*seen).clone()
}

/// Poll `check` until it holds.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + WAIT;
    while !check() {
        assert!(Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
