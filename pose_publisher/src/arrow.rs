//! The directional arrow drawn while a pose drag is in progress.

use egui::{Color32, Mesh, Painter, Pos2, Shape, Stroke};

use crate::{
    position::{MapPoint, map_point},
    projector::Projector,
};

/// Arrow outline in local, unscaled units, pointing along positive x. The tip comes first so
/// the filled mesh can fan around it.
const OUTLINE: [(f64, f64); 7] = [
    (10., 0.),
    (6., -2.5),
    (6.5, -1.),
    (0., -1.),
    (0., 1.),
    (6.5, 1.),
    (6., 2.5),
];

/// Screen pixels per outline unit, keeping the glyph a constant size regardless of zoom.
const UNIT_SCALE: f64 = 10.;

const FILL: Color32 = Color32::from_rgb(25, 229, 25);
const STROKE: Color32 = Color32::from_rgb(0, 153, 0);

/// The arrow outline scaled, rotated by `angle` and translated to `tail`, in fixed-frame
/// coordinates.
pub(crate) fn outline(tail: MapPoint, angle: f64, meters_per_pixel: f64) -> [MapPoint; 7] {
    let (sin, cos) = angle.sin_cos();
    OUTLINE.map(|(x, y)| {
        let x = x * UNIT_SCALE * meters_per_pixel;
        let y = y * UNIT_SCALE * meters_per_pixel;
        map_point(tail.x() + x * cos - y * sin, tail.y() + x * sin + y * cos)
    })
}

/// Draw the arrow as a filled fan plus a darker outline loop.
pub(crate) fn draw(painter: &Painter, projector: &Projector, tail: MapPoint, angle: f64) {
    let points: Vec<Pos2> = outline(tail, angle, projector.meters_per_pixel())
        .iter()
        .map(|point| projector.project(*point).to_pos2())
        .collect();

    let mut fill = Mesh::default();
    for point in &points {
        fill.colored_vertex(*point, FILL);
    }
    for i in 1..points.len() as u32 - 1 {
        fill.add_triangle(0, i, i + 1);
    }

    painter.add(Shape::mesh(fill));
    painter.add(Shape::closed_line(points, Stroke::new(2., STROKE)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn unrotated_arrow_points_east() {
        let points = outline(map_point(5., 5.), 0., 0.1);

        // Ten outline units, ten pixels each, at ten meters per hundred pixels.
        assert_relative_eq!(15., points[0].x());
        assert_relative_eq!(5., points[0].y());
    }

    #[test]
    fn rotated_arrow_points_north() {
        let points = outline(map_point(0., 0.), FRAC_PI_2, 0.1);

        assert_relative_eq!(0., points[0].x(), epsilon = 1e-9);
        assert_relative_eq!(10., points[0].y());
    }

    #[test]
    fn tail_edge_stays_at_the_tail() {
        let points = outline(map_point(2., 3.), 1.234, 0.1);

        // Points 3 and 4 span the tail edge; their midpoint is the pose position.
        assert_relative_eq!(2., (points[3].x() + points[4].x()) / 2., epsilon = 1e-9);
        assert_relative_eq!(3., (points[3].y() + points[4].y()) / 2., epsilon = 1e-9);
    }
}
