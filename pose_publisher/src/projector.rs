use egui::{Rect, Vec2};

use crate::{
    memory::CanvasMemory,
    position::{MapPoint, map_point},
};

/// Projects fixed-frame positions into pixels on the viewport, suitable for [`egui::Painter`].
#[derive(Clone)]
pub struct Projector {
    clip_rect: Rect,
    memory: CanvasMemory,
}

impl Projector {
    pub fn new(clip_rect: Rect, memory: &CanvasMemory) -> Self {
        Self {
            clip_rect,
            memory: memory.to_owned(),
        }
    }

    /// Project `position` into pixels on the viewport.
    pub fn project(&self, position: MapPoint) -> Vec2 {
        let scale = self.memory.scale();
        let center = self.memory.center();

        self.clip_rect.center().to_vec2()
            + Vec2::new(
                ((position.x() - center.x()) * scale) as f32,
                // Screen y grows downwards, fixed-frame y grows north.
                (-(position.y() - center.y()) * scale) as f32,
            )
    }

    /// Get fixed-frame coordinates from viewport's pixels position.
    pub fn unproject(&self, position: Vec2) -> MapPoint {
        let scale = self.memory.scale();
        let center = self.memory.center();
        let clip_center = self.clip_rect.center();

        map_point(
            center.x() + (position.x - clip_center.x) as f64 / scale,
            center.y() - (position.y - clip_center.y) as f64 / scale,
        )
    }

    /// How many meters a single pixel spans at the current scale.
    pub fn meters_per_pixel(&self) -> f64 {
        1. / self.memory.scale()
    }
}
