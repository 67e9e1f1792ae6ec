#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

mod arrow;
mod canvas;
mod config;
mod frames;
mod gesture;
mod memory;
mod msg;
mod plugin;
mod position;
mod projector;
mod publish;
#[cfg(feature = "rosbridge")]
pub mod rosbridge;
mod ticker;

pub use canvas::{MapCanvas, Plugin, PointerEvent};
pub use config::PluginConfig;
pub use frames::{
    FrameRegistry, FrameSelector, LOCAL_XY_FRAME, StaticFrames, WGS84_FRAME, output_frames,
    sync_selector,
};
pub use memory::{CanvasMemory, InvalidScale};
pub use msg::{
    Header, Point, Pose, PoseWithCovariance, PoseWithCovarianceStamped, Quaternion, Time,
};
pub use plugin::{PanelState, PosePublisherPlugin, Severity, Status};
pub use position::{MapPoint, map_point};
pub use projector::Projector;
pub use publish::{LocalTransport, PosePublisher, PublishError, Transport};
pub use ticker::Cadence;
