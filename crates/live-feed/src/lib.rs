//! Kitchen Live Feed - snapshot plus push stream, merged by key.
//!
//! A live feed starts from one REST snapshot and layers a WebSocket push
//! stream on top of it. Incoming events are merged into the snapshot according
//! to the feed's [`MergePolicy`]; connection health is published alongside the
//! merged collection so a UI can show it.
//!
//! ```text
//!   GET snapshot ──┐
//!                  ├─► FeedCollection ──► watch::Receiver<FeedView>
//!   WS stream ─────┘          │
//!     ▲    │                  └─► NoticeSink (transient notices)
//!     │    ▼
//!   retry after fixed delay on close
//! ```
//!
//! Two feeds ship with the crate: notifications (newest first, every event
//! kept) and portion estimates (one entry per meal).
//!
//! # Usage
//!
//! ```rust,ignore
//! use kitchen_client::KitchenClient;
//! use kitchen_core::PortionEstimate;
//! use kitchen_live_feed::LiveFeed;
//!
//! let client = KitchenClient::new("http://localhost:8000")?;
//! let handle = LiveFeed::<PortionEstimate>::new(client).spawn()?;
//! let mut view = handle.subscribe();
//! while view.changed().await.is_ok() {
//!     println!("{} meals, {}", view.borrow().len(), view.borrow().connection());
//! }
//! ```

mod bus;
mod endpoint;
mod error;
mod event;
mod feed;
mod handle;
mod merge;
mod notice;
mod options;
mod state;
mod task;
mod transport;

pub use bus::NoticeBus;
pub use endpoint::stream_url;
pub use error::{FeedError, Result};
pub use event::{FeedDescriptor, FeedEvent};
pub use feed::{LiveFeed, NotificationFeed, PortionFeed};
pub use handle::FeedHandle;
pub use merge::{FeedCollection, MergeOutcome, MergePolicy};
pub use notice::{MockNoticeSink, NoOpNoticeSink, Notice, NoticeLevel, NoticeSink};
pub use options::FeedOptions;
pub use state::{ConnectionState, FeedView};
