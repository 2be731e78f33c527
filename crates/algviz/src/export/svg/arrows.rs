//! Arrow shapes and arrowhead markers.

use svg::node::element as svg_element;

use algviz_core::{color::Color, geometry::Point};

use crate::element::ArrowKind;

fn marker_id(color: Color) -> String {
    format!("arrow-right-{}", color.to_id_safe_string())
}

/// Arrowhead pointing along the end of a path, declared once per color.
pub fn create_marker(color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", marker_id(color))
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        )
}

/// Draws an arrow between two points, ending in the marker for `color`.
pub fn render_arrow(kind: ArrowKind, start: Point, end: Point, color: Color, width: f32) -> Box<dyn svg::Node> {
    let marker = format!("url(#{})", marker_id(color));
    match kind {
        ArrowKind::Straight => Box::new(
            svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y())
                .set("stroke", color.to_string())
                .set("stroke-width", width)
                .set("marker-end", marker),
        ),
        ArrowKind::Spline => Box::new(
            svg_element::Path::new()
                .set("d", curved_path_data(start, end))
                .set("fill", "none")
                .set("stroke", color.to_string())
                .set("stroke-width", width)
                .set("marker-end", marker),
        ),
    }
}

/// Cubic bezier from `start` to `end`. The control points sit on opposite
/// sides of the chord, so the curve is a gentle S rather than a one-sided bow.
fn curved_path_data(start: Point, end: Point) -> String {
    let ctrl1_x = start.x() + (end.x() - start.x()) / 4.0;
    let ctrl1_y = start.y() - (end.y() - start.y()) / 2.0;

    let ctrl2_x = end.x() - (end.x() - start.x()) / 4.0;
    let ctrl2_y = end.y() + (start.y() - end.y()) / 2.0;

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        ctrl1_x,
        ctrl1_y,
        ctrl2_x,
        ctrl2_y,
        end.x(),
        end.y()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curved_path_data() {
        let data = curved_path_data(Point::new(0.0, 0.0), Point::new(8.0, 4.0));
        assert_eq!(data, "M 0 0 C 2 -2, 6 2, 8 4");
    }

    #[test]
    fn test_straight_arrow_is_a_line() {
        let color = Color::new("red").unwrap();
        let node = render_arrow(
            ArrowKind::Straight,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            color,
            2.0,
        );
        let rendered = node.to_string();
        assert!(rendered.starts_with("<line"));
        assert!(rendered.contains(&format!("url(#{})", marker_id(color))));
    }

    #[test]
    fn test_spline_arrow_is_a_path() {
        let color = Color::default();
        let rendered = render_arrow(
            ArrowKind::Spline,
            Point::new(0.0, 0.0),
            Point::new(8.0, 4.0),
            color,
            2.0,
        )
        .to_string();
        assert!(rendered.starts_with("<path"));
        assert!(rendered.contains("C 2 -2, 6 2, 8 4"));
    }

    #[test]
    fn test_marker_id_matches_reference() {
        let color = Color::new("rgb(50, 50, 50)").unwrap();
        let rendered = create_marker(color).to_string();
        assert!(rendered.contains(&format!("id=\"{}\"", marker_id(color))));
    }
}
