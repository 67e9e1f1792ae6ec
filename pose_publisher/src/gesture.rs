use crate::position::MapPoint;

/// State of the drag-to-pose gesture. The point where the drag started is the pose position,
/// the direction dragged in is its heading.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum DragState {
    #[default]
    Idle,

    /// Primary button is down; the arrow tail stays where the press happened.
    Dragging { tail: MapPoint, angle: f64 },
}

impl DragState {
    /// Start a drag with the arrow tail at `tail` and a zero heading.
    pub fn press(&mut self, tail: MapPoint) {
        *self = DragState::Dragging { tail, angle: 0. };
    }

    /// Point the arrow from its tail towards `head`. No-op while no drag is active.
    pub fn drag_to(&mut self, head: MapPoint) {
        if let DragState::Dragging { tail, angle } = self {
            *angle = (head.y() - tail.y()).atan2(head.x() - tail.x());
        }
    }

    /// Finish the drag, returning the recorded tail and heading if one was active.
    pub fn release(&mut self) -> Option<(MapPoint, f64)> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging { tail, angle } => Some((tail, angle)),
        }
    }

    /// Tail and heading of the drag in progress, if any.
    pub fn active(&self) -> Option<(MapPoint, f64)> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { tail, angle } => Some((*tail, *angle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::map_point;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn press_then_release_keeps_zero_heading() {
        let mut drag = DragState::default();
        drag.press(map_point(3., 4.));

        let (tail, angle) = drag.release().unwrap();
        assert_eq!(map_point(3., 4.), tail);
        assert_eq!(0., angle);
        assert_eq!(DragState::Idle, drag);
    }

    #[test]
    fn heading_follows_the_drag() {
        let mut drag = DragState::default();
        drag.press(map_point(1., 1.));
        drag.drag_to(map_point(2., 2.));

        let (_, angle) = drag.release().unwrap();
        assert_relative_eq!(FRAC_PI_4, angle);
    }

    #[test]
    fn heading_is_scale_invariant() {
        let mut near = DragState::default();
        near.press(map_point(0., 0.));
        near.drag_to(map_point(0.3, -0.4));

        let mut far = DragState::default();
        far.press(map_point(0., 0.));
        far.drag_to(map_point(300., -400.));

        assert_relative_eq!(near.release().unwrap().1, far.release().unwrap().1);
    }

    #[test]
    fn only_the_last_drag_position_counts() {
        let mut drag = DragState::default();
        drag.press(map_point(0., 0.));
        drag.drag_to(map_point(5., 5.));
        drag.drag_to(map_point(-7., 0.));

        let (_, angle) = drag.release().unwrap();
        assert_relative_eq!(std::f64::consts::PI, angle);
    }

    #[test]
    fn release_without_press_is_a_noop() {
        let mut drag = DragState::default();
        drag.drag_to(map_point(1., 0.));
        assert_eq!(None, drag.release());
    }
}
