use log::warn;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::event::FeedEvent;
use crate::state::FeedView;

/// Owner of a running feed.
///
/// Dropping the handle stops the feed: the stream is closed and any pending
/// reconnect is cancelled. Use [`FeedHandle::shutdown`] to wait for that to
/// finish.
pub struct FeedHandle<E: FeedEvent> {
    view: watch::Receiver<FeedView<E>>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl<E: FeedEvent> FeedHandle<E> {
    pub(crate) fn new(
        view: watch::Receiver<FeedView<E>>,
        shutdown: watch::Sender<bool>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            view,
            shutdown,
            task: Some(task),
        }
    }

    /// A receiver that is notified whenever the collection or connection
    /// state changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedView<E>> {
        self.view.clone()
    }

    pub fn current(&self) -> FeedView<E> {
        self.view.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Stop the feed and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.shutdown.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Feed task ended abnormally: {}", e);
            }
        }
    }
}

impl<E: FeedEvent> Drop for FeedHandle<E> {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}
