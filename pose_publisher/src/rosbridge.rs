//! ROS bindings over a rosbridge websocket server.
//!
//! Enabled with the `rosbridge` cargo feature. The transport owns a Tokio runtime on its own
//! worker thread, so publishing from the GUI thread stays non-blocking.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use log::warn;
use roslibrust::rosbridge::ClientHandle;
use serde::{Deserialize, Serialize};

use crate::{
    frames::FrameRegistry,
    msg::{Header, PoseWithCovarianceStamped, Quaternion},
    publish::{PosePublisher, PublishError, Transport},
};

impl roslibrust::RosMessageType for PoseWithCovarianceStamped {
    const ROS_TYPE_NAME: &'static str = "geometry_msgs/PoseWithCovarianceStamped";
    const MD5SUM: &'static str = "953b798c0f514ff060a53a3498ce6246";
    const DEFINITION: &'static str = "";
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Transform {
    translation: Vector3,
    rotation: Quaternion,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct TransformStamped {
    header: Header,
    child_frame_id: String,
    transform: Transform,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct TfMessage {
    transforms: Vec<TransformStamped>,
}

impl roslibrust::RosMessageType for TfMessage {
    const ROS_TYPE_NAME: &'static str = "tf2_msgs/TFMessage";
    const MD5SUM: &'static str = "94810edda583a504dfda3829e70d7eec";
    const DEFINITION: &'static str = "";
}

fn transport_error(error: impl std::fmt::Display) -> PublishError {
    PublishError::Transport(error.to_string())
}

/// [`Transport`] publishing through a rosbridge server.
pub struct RosbridgeTransport {
    client: ClientHandle,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl RosbridgeTransport {
    /// Connect to a rosbridge server, e.g. `ws://localhost:9090`.
    pub fn connect(url: &str) -> Result<Self, PublishError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(transport_error)?;

        let client = runtime
            .block_on(ClientHandle::new(url))
            .map_err(transport_error)?;

        Ok(Self {
            client,
            runtime: Arc::new(runtime),
        })
    }
}

impl Transport for RosbridgeTransport {
    fn advertise(&self, topic: &str) -> Result<Box<dyn PosePublisher>, PublishError> {
        let publisher = self
            .runtime
            .block_on(self.client.advertise::<PoseWithCovarianceStamped>(topic))
            .map_err(transport_error)?;

        Ok(Box::new(RosbridgePublisher {
            publisher: Arc::new(publisher),
            runtime: Arc::clone(&self.runtime),
        }))
    }
}

struct RosbridgePublisher {
    publisher: Arc<roslibrust::rosbridge::Publisher<PoseWithCovarianceStamped>>,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl PosePublisher for RosbridgePublisher {
    fn publish(&self, pose: &PoseWithCovarianceStamped) -> Result<(), PublishError> {
        let publisher = Arc::clone(&self.publisher);
        let pose = pose.clone();

        // Fire and forget; delivery is rosbridge's concern.
        self.runtime.spawn(async move {
            if let Err(error) = publisher.publish(&pose).await {
                warn!("rosbridge publish failed: {error}");
            }
        });

        Ok(())
    }
}

/// [`FrameRegistry`] fed by the `/tf` and `/tf_static` topics.
pub struct TfFrameRegistry {
    frames: Arc<Mutex<BTreeSet<String>>>,
}

impl TfFrameRegistry {
    /// Start listening for transforms through an already connected transport.
    pub fn new(transport: &RosbridgeTransport) -> Result<Self, PublishError> {
        let frames = Arc::new(Mutex::new(BTreeSet::new()));

        for topic in ["/tf", "/tf_static"] {
            let mut subscriber = transport
                .runtime
                .block_on(transport.client.subscribe::<TfMessage>(topic))
                .map_err(transport_error)?;

            let frames = Arc::clone(&frames);
            transport.runtime.spawn(async move {
                loop {
                    let message = subscriber.next().await;
                    let Ok(mut frames) = frames.lock() else {
                        return;
                    };
                    for transform in &message.transforms {
                        frames.insert(strip_slash(&transform.header.frame_id));
                        frames.insert(strip_slash(&transform.child_frame_id));
                    }
                }
            });
        }

        Ok(Self { frames })
    }
}

impl FrameRegistry for TfFrameRegistry {
    fn frame_ids(&self) -> Vec<String> {
        self.frames
            .lock()
            .map(|frames| frames.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn supports_transform(&self, from: &str, to: &str) -> bool {
        self.frames
            .lock()
            .map(|frames| frames.contains(from) && frames.contains(to))
            .unwrap_or(false)
    }
}

/// tf2 frame ids drop the ROS1 leading slash; normalize so lookups match either convention.
fn strip_slash(frame: &str) -> String {
    frame.trim_start_matches('/').to_owned()
}
