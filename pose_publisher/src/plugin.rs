//! The pose publisher plugin: arm the trigger, drag on the canvas, publish the pose.

use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::{Color32, ComboBox, CursorIcon, Painter, Pos2, RichText, TextEdit, Ui};
use log::{info, warn};

use crate::{
    arrow,
    canvas::{Plugin, PointerEvent},
    config::PluginConfig,
    frames::{FrameRegistry, FrameSelector, output_frames, sync_selector},
    gesture::DragState,
    msg::{Header, Point, Pose, PoseWithCovariance, PoseWithCovarianceStamped, Quaternion, Time},
    position::MapPoint,
    projector::Projector,
    publish::{PosePublisher, Transport},
    ticker::Cadence,
};

/// Severity of a panel status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Status line shown at the bottom of the config panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    fn color(&self) -> Color32 {
        match self.severity {
            Severity::Info => Color32::GREEN,
            Severity::Warning => Color32::ORANGE,
            Severity::Error => Color32::RED,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::info("OK")
    }
}

/// Widget state of the config panel, kept apart from egui so the plugin logic can be
/// exercised without a GUI.
#[derive(Debug, Default)]
pub struct PanelState {
    /// Output topic as typed into the text field.
    pub topic: String,

    /// The output-frame combo box.
    pub output_frame: FrameSelector,

    /// The "place pose" trigger: while set, the next canvas drag becomes a pose.
    pub armed: bool,

    /// Whether the trigger button accepts input.
    pub trigger_enabled: bool,

    pub status: Status,
}

/// Both periodic jobs run on a one second cadence.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Map canvas plugin turning a click-and-drag into a stamped pose on a configurable topic.
///
/// The transport and the frame registry are injected so hosts (and tests) decide what the
/// plugin talks to. Call [`tick`](Self::tick) once per frame to keep the periodic jobs
/// running, and [`show`](Self::show) wherever the config panel should appear.
pub struct PosePublisherPlugin {
    transport: Arc<dyn Transport>,
    registry: Arc<dyn FrameRegistry>,
    publisher: Option<Box<dyn PosePublisher>>,
    pub panel: PanelState,
    drag: DragState,
    frame_sync: Cadence,
    health: Cadence,
}

impl PosePublisherPlugin {
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<dyn FrameRegistry>) -> Self {
        Self {
            transport,
            registry,
            publisher: None,
            panel: PanelState::default(),
            drag: DragState::default(),
            frame_sync: Cadence::new(TICK_PERIOD),
            health: Cadence::new(TICK_PERIOD),
        }
    }

    /// Change the output topic, rebinding the publisher immediately. An empty topic leaves
    /// the previous binding intact.
    pub fn set_topic(&mut self, topic: &str) {
        self.panel.topic = topic.to_owned();
        self.panel.status = Status::info(format!("publishing poses to topic: {topic}"));

        if topic.is_empty() {
            return;
        }

        match self.transport.advertise(topic) {
            Ok(publisher) => self.publisher = Some(publisher),
            Err(error) => {
                warn!("could not advertise {topic}: {error}");
                self.panel.status = Status::error(format!("could not advertise {topic}: {error}"));
            }
        }
    }

    /// Run the periodic jobs which are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.frame_sync.due(now) {
            let frames = output_frames(self.registry.as_ref());
            sync_selector(&mut self.panel.output_frame, &frames);
        }

        if self.health.due(now) {
            self.panel.trigger_enabled = true;
            self.panel.status = Status::info("OK");
        }
    }

    /// Apply loaded settings. Absent keys keep their defaults.
    pub fn load_config(&mut self, config: &PluginConfig) {
        if let Some(topic) = &config.topic {
            let topic = topic.clone();
            self.set_topic(&topic);
        }

        if let Some(frame) = &config.output_frame {
            self.panel.output_frame.push(frame.clone());
        }
    }

    /// Settings to persist, sourced from the live widget state.
    pub fn save_config(&self) -> PluginConfig {
        PluginConfig {
            topic: Some(self.panel.topic.clone()),
            output_frame: Some(
                self.panel
                    .output_frame
                    .current()
                    .unwrap_or_default()
                    .to_owned(),
            ),
        }
    }

    /// Render the config panel.
    pub fn show(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Topic:");
            if ui
                .add(TextEdit::singleline(&mut self.panel.topic))
                .changed()
            {
                let topic = self.panel.topic.clone();
                self.set_topic(&topic);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Output frame:");
            let selector = &mut self.panel.output_frame;
            ComboBox::from_id_salt("output_frame")
                .selected_text(selector.current().unwrap_or_default().to_owned())
                .show_ui(ui, |ui| {
                    let mut selected = selector.selected();
                    for (index, item) in selector.items().iter().enumerate() {
                        ui.selectable_value(&mut selected, Some(index), item);
                    }
                    if let Some(index) = selected {
                        selector.set_selected(index);
                    }
                });
        });

        ui.add_enabled_ui(self.panel.trigger_enabled, |ui| {
            ui.toggle_value(&mut self.panel.armed, "Place pose");
        });

        ui.label(RichText::new(&self.panel.status.text).color(self.panel.status.color()));
    }

    fn handle_press(&mut self, position: Pos2, projector: &Projector) -> bool {
        if !self.panel.armed {
            return false;
        }

        self.drag.press(projector.unproject(position.to_vec2()));
        true
    }

    fn handle_move(&mut self, position: Pos2, projector: &Projector) -> bool {
        self.drag.drag_to(projector.unproject(position.to_vec2()));
        false
    }

    fn handle_release(&mut self) -> bool {
        let Some((tail, angle)) = self.drag.release() else {
            return false;
        };

        if !self.panel.armed {
            return false;
        }

        let pose = self.stamped_pose(tail, angle);
        if let Some(publisher) = &self.publisher {
            if let Err(error) = publisher.publish(&pose) {
                warn!("publishing failed: {error}");
                self.panel.status = Status::error(format!("publishing failed: {error}"));
                return true;
            }
        }

        self.panel.armed = false;

        let status = format!(
            "pose published to topic: {} in frame {}",
            self.panel.topic, pose.header.frame_id
        );
        info!("{status}");
        self.panel.status = Status::info(status);
        true
    }

    fn stamped_pose(&self, tail: MapPoint, angle: f64) -> PoseWithCovarianceStamped {
        PoseWithCovarianceStamped {
            header: Header {
                seq: 0,
                stamp: Time::now(),
                frame_id: self
                    .panel
                    .output_frame
                    .current()
                    .unwrap_or_default()
                    .to_owned(),
            },
            pose: PoseWithCovariance {
                pose: Pose {
                    position: Point {
                        x: tail.x(),
                        y: tail.y(),
                        z: 0.,
                    },
                    orientation: Quaternion::from_yaw(angle),
                },
                covariance: vec![0.; 36],
            },
        }
    }
}

impl Plugin for PosePublisherPlugin {
    fn handle_event(&mut self, event: &PointerEvent, projector: &Projector) -> bool {
        match *event {
            PointerEvent::Pressed(position) => self.handle_press(position, projector),
            PointerEvent::Moved(position) => self.handle_move(position, projector),
            PointerEvent::Released(_) => self.handle_release(),
        }
    }

    fn draw(&self, ui: &Ui, painter: Painter, projector: &Projector) {
        if self.panel.armed {
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        }

        if let Some((tail, angle)) = self.drag.active() {
            arrow::draw(&painter, projector, tail, angle);
        }
    }
}
