use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::watch;
use url::Url;

use kitchen_client::KitchenClient;
use kitchen_core::{Notification, PortionEstimate};

use crate::endpoint;
use crate::error::Result;
use crate::event::{FeedDescriptor, FeedEvent};
use crate::handle::FeedHandle;
use crate::notice::{NoOpNoticeSink, NoticeSink};
use crate::options::FeedOptions;
use crate::state::FeedView;
use crate::task::FeedTask;

/// Notifications, newest first, each pushed one raised as a notice.
pub type NotificationFeed = LiveFeed<Notification>;

/// Portion estimates, one entry per meal.
pub type PortionFeed = LiveFeed<PortionEstimate>;

/// Builder for a live feed of `E` events.
///
/// Endpoints and merge policy default to [`FeedEvent::descriptor`]; notices
/// are discarded unless a sink is set.
pub struct LiveFeed<E: FeedEvent> {
    client: KitchenClient,
    descriptor: FeedDescriptor,
    options: FeedOptions,
    notices: Arc<dyn NoticeSink>,
    _event: PhantomData<fn() -> E>,
}

impl<E: FeedEvent> LiveFeed<E> {
    pub fn new(client: KitchenClient) -> Self {
        Self {
            client,
            descriptor: E::descriptor(),
            options: FeedOptions::default(),
            notices: Arc::new(NoOpNoticeSink),
            _event: PhantomData,
        }
    }

    pub fn with_descriptor(mut self, descriptor: FeedDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn with_options(mut self, options: FeedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_notice_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.notices = sink;
        self
    }

    pub fn descriptor(&self) -> &FeedDescriptor {
        &self.descriptor
    }

    /// Push-stream URL derived from the client's origin.
    pub fn stream_url(&self) -> Result<Url> {
        endpoint::stream_url(self.client.base_url(), self.descriptor.stream_path)
    }

    /// Start the feed on the current tokio runtime.
    ///
    /// The snapshot request and the first connection attempt start right
    /// away. Fails only if the stream URL cannot be derived.
    pub fn spawn(self) -> Result<FeedHandle<E>> {
        let stream_url = self.stream_url()?;
        let (view_tx, view_rx) = watch::channel(FeedView::new(self.descriptor.policy));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = FeedTask {
            client: self.client,
            descriptor: self.descriptor,
            stream_url,
            options: self.options,
            notices: self.notices,
            view: view_tx,
        };
        let join = tokio::spawn(task.run(shutdown_rx));

        Ok(FeedHandle::new(view_rx, shutdown_tx, join))
    }
}
