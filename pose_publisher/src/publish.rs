//! Outbound transport seam for stamped poses.

use std::sync::{Arc, Mutex};

use crate::msg::PoseWithCovarianceStamped;

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Topic-bound endpoint for outgoing poses. Publishing is fire-and-forget; delivery and
/// backpressure are the transport's concern.
pub trait PosePublisher {
    fn publish(&self, pose: &PoseWithCovarianceStamped) -> Result<(), PublishError>;
}

/// Connection to a pub/sub transport, able to bind publishers to topics. Binding the same
/// topic again simply replaces the previous publisher.
pub trait Transport {
    fn advertise(&self, topic: &str) -> Result<Box<dyn PosePublisher>, PublishError>;
}

type Journal = Arc<Mutex<Vec<(String, PoseWithCovarianceStamped)>>>;

/// In-process transport which journals everything published through it. Backs the demo
/// application and the tests.
#[derive(Debug, Default, Clone)]
pub struct LocalTransport {
    journal: Journal,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All poses published so far, with the topics they went out on.
    pub fn published(&self) -> Vec<(String, PoseWithCovarianceStamped)> {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }
}

impl Transport for LocalTransport {
    fn advertise(&self, topic: &str) -> Result<Box<dyn PosePublisher>, PublishError> {
        Ok(Box::new(LocalPublisher {
            topic: topic.to_owned(),
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct LocalPublisher {
    topic: String,
    journal: Journal,
}

impl PosePublisher for LocalPublisher {
    fn publish(&self, pose: &PoseWithCovarianceStamped) -> Result<(), PublishError> {
        self.journal
            .lock()
            .map_err(|_| PublishError::Transport("journal poisoned".to_owned()))?
            .push((self.topic.clone(), pose.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_records_topic_and_pose() {
        let transport = LocalTransport::new();
        let publisher = transport.advertise("/selected_pose").unwrap();

        publisher
            .publish(&PoseWithCovarianceStamped::default())
            .unwrap();

        let published = transport.published();
        assert_eq!(1, published.len());
        assert_eq!("/selected_pose", published[0].0);
    }

    #[test]
    fn publishers_outlive_rebinding() {
        let transport = LocalTransport::new();
        let first = transport.advertise("/a").unwrap();
        let second = transport.advertise("/b").unwrap();

        first.publish(&PoseWithCovarianceStamped::default()).unwrap();
        second.publish(&PoseWithCovarianceStamped::default()).unwrap();

        let topics: Vec<_> = transport
            .published()
            .into_iter()
            .map(|(topic, _)| topic)
            .collect();
        assert_eq!(vec!["/a".to_owned(), "/b".to_owned()], topics);
    }
}
