use tokio::sync::broadcast;

use crate::notice::{Notice, NoticeSink};

/// Broadcast bus that fans notices out to any number of listeners.
///
/// Several feeds can share one bus; the monitor subscribes once and logs
/// whatever arrives.
#[derive(Clone)]
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notice: Notice) {
        // No listeners or a lagging listener is not an error for the producer.
        let _ = self.sender.send(notice);
    }
}

impl NoticeSink for NoticeBus {
    fn emit(&self, notice: Notice) {
        self.publish(notice);
    }
}
