use egui::Vec2;

use crate::position::{MapPoint, map_point};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid canvas scale")]
pub struct InvalidScale;

/// Canvas scale in pixels per meter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scale(f64);

impl TryFrom<f64> for Scale {
    type Error = InvalidScale;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // Anything between a 100 m pixel and a millimeter pixel is workable.
        if !(0.01..=1000.).contains(&value) {
            Err(InvalidScale)
        } else {
            Ok(Self(value))
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(10.)
    }
}

impl Scale {
    pub fn pixels_per_meter(&self) -> f64 {
        self.0
    }

    pub fn zoom_in(&mut self) -> Result<(), InvalidScale> {
        *self = Self::try_from(self.0 * 2.)?;
        Ok(())
    }

    pub fn zoom_out(&mut self) -> Result<(), InvalidScale> {
        *self = Self::try_from(self.0 / 2.)?;
        Ok(())
    }

    /// Zoom using a relative factor, saturating at the supported range.
    pub fn zoom_by(&mut self, factor: f64) {
        if let Ok(new_self) = Self::try_from(self.0 * factor) {
            *self = new_self;
        }
    }
}

/// State of the canvas which must persist between frames.
#[derive(Debug, Clone)]
pub struct CanvasMemory {
    pub(crate) center: MapPoint,
    pub(crate) scale: Scale,
    /// Whether an unconsumed primary press has anchored a canvas pan.
    pub(crate) panning: bool,
    /// Whether the current primary-button gesture started on the canvas.
    pub(crate) captured: bool,
}

impl Default for CanvasMemory {
    fn default() -> Self {
        Self {
            center: map_point(0., 0.),
            scale: Scale::default(),
            panning: false,
            captured: false,
        }
    }
}

impl CanvasMemory {
    /// Try to zoom in, returning `Err(InvalidScale)` if already at maximum.
    pub fn zoom_in(&mut self) -> Result<(), InvalidScale> {
        self.scale.zoom_in()
    }

    /// Try to zoom out, returning `Err(InvalidScale)` if already at minimum.
    pub fn zoom_out(&mut self) -> Result<(), InvalidScale> {
        self.scale.zoom_out()
    }

    /// Set the exact scale, in pixels per meter.
    pub fn set_scale(&mut self, pixels_per_meter: f64) -> Result<(), InvalidScale> {
        self.scale = Scale::try_from(pixels_per_meter)?;
        Ok(())
    }

    /// Current scale, in pixels per meter.
    pub fn scale(&self) -> f64 {
        self.scale.pixels_per_meter()
    }

    pub(crate) fn zoom_by(&mut self, factor: f64) {
        self.scale.zoom_by(factor);
    }

    /// Center the view exactly at the given fixed-frame position.
    pub fn center_at(&mut self, position: MapPoint) {
        self.center = position;
    }

    /// Fixed-frame position at the center of the view.
    pub fn center(&self) -> MapPoint {
        self.center
    }

    /// Shift the view by a drag delta in screen pixels.
    pub(crate) fn pan(&mut self, delta: Vec2) {
        let scale = self.scale();
        self.center = map_point(
            // Dragging the canvas moves the content, so the center goes the other way.
            self.center.x() - delta.x as f64 / scale,
            self.center.y() + delta.y as f64 / scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructing_scale() {
        assert_eq!(10., Scale::default().pixels_per_meter());
        assert_eq!(1000., Scale::try_from(1000.).unwrap().pixels_per_meter());
        assert_eq!(InvalidScale, Scale::try_from(2000.).unwrap_err());
        assert_eq!(InvalidScale, Scale::try_from(0.).unwrap_err());
    }

    #[test]
    fn test_zooming_in() {
        let mut scale = Scale::try_from(400.).unwrap();
        assert!(scale.zoom_in().is_ok());
        assert_eq!(800., scale.pixels_per_meter());
        assert_eq!(Err(InvalidScale), scale.zoom_in());
    }

    #[test]
    fn test_zooming_out() {
        let mut scale = Scale::try_from(0.02).unwrap();
        assert!(scale.zoom_out().is_ok());
        assert_eq!(0.01, scale.pixels_per_meter());
        assert_eq!(Err(InvalidScale), scale.zoom_out());
    }

    #[test]
    fn panning_moves_the_center_against_the_drag() {
        let mut memory = CanvasMemory::default();
        memory.set_scale(10.).unwrap();
        memory.pan(Vec2::new(20., -40.));
        assert_eq!(-2., memory.center().x());
        assert_eq!(-4., memory.center().y());
    }
}
