//! SVG shapes for rectangular elements.

use svg::node::element as svg_element;

use algviz_core::geometry::{Extent, Point};

use super::{
    layer::{LayeredOutput, RenderLayer},
    text::{lines, render_text},
    theme::Theme,
};
use crate::{
    config::NodeShape,
    element::{ElementKind, RectElement},
};

/// Paints `element` with its top-left corner at `top_left`.
pub fn render_element(theme: &Theme, element: &RectElement, top_left: Point) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let (x, y) = (top_left.x(), top_left.y());
    let (w, h) = (element.width(), element.height());
    let center = Point::new(x + w / 2.0, y + h / 2.0);
    let stroke = theme.stroke_color().to_string();

    match element.kind() {
        ElementKind::Node => {
            let fill = theme.stroke_color().with_alpha(theme.node_fill_opacity());
            match theme.node_shape() {
                NodeShape::Box => output.add_to_layer(
                    RenderLayer::Content,
                    Box::new(
                        svg_element::Rectangle::new()
                            .set("x", x)
                            .set("y", y)
                            .set("width", w)
                            .set("height", h)
                            .set("fill", fill.to_string())
                            .set("stroke", stroke)
                            .set("stroke-width", theme.stroke_width()),
                    ),
                ),
                NodeShape::Ellipse => output.add_to_layer(
                    RenderLayer::Content,
                    Box::new(
                        svg_element::Ellipse::new()
                            .set("cx", center.x())
                            .set("cy", center.y())
                            .set("rx", w / 2.0)
                            .set("ry", h / 2.0)
                            .set("fill", fill.to_string())
                            .set("stroke", stroke)
                            .set("stroke-width", theme.stroke_width()),
                    ),
                ),
                NodeShape::Hidden => {}
            }
        }
        ElementKind::String { text } => {
            let line_height = h / lines(text).len() as f32;
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(render_text(
                    text,
                    center,
                    element.size(),
                    theme.font_family(),
                    theme.font_size_for(line_height),
                    theme.stroke_color(),
                )),
            );
        }
        ElementKind::PointerSource => output.add_to_layer(
            RenderLayer::Content,
            Box::new(
                svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", w.min(h) / 2.0)
                    .set("fill", theme.arrow_color().to_string()),
            ),
        ),
        ElementKind::Null => {
            let points = format!(
                "{},{} {},{} {},{} {},{}",
                center.x(),
                y,
                x + w,
                center.y(),
                center.x(),
                y + h,
                x,
                center.y()
            );
            output.add_to_layer(
                RenderLayer::Content,
                Box::new(
                    svg_element::Polygon::new()
                        .set("points", points)
                        .set("fill", "none")
                        .set("stroke", stroke)
                        .set("stroke-width", theme.stroke_width()),
                ),
            );
        }
        ElementKind::ArrayFrame { separators } => {
            let points = format!("{x},{y} {},{y} {},{} {x},{}", x + w, x + w, y + h, y + h);
            output.add_to_layer(
                RenderLayer::Content,
                Box::new(
                    svg_element::Polygon::new()
                        .set("points", points)
                        .set("fill", "none")
                        .set("stroke", stroke.clone())
                        .set("stroke-width", theme.stroke_width()),
                ),
            );
            for separator in separators {
                output.add_to_layer(
                    RenderLayer::Content,
                    Box::new(
                        svg_element::Line::new()
                            .set("x1", x + separator)
                            .set("y1", y)
                            .set("x2", x + separator)
                            .set("y2", y + h)
                            .set("stroke", stroke.clone())
                            .set("stroke-width", theme.stroke_width()),
                    ),
                );
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use algviz_core::geometry::Size;

    use super::*;
    use crate::config::{AppConfig, LayoutConfig, StyleConfig};

    fn rendered(theme: &Theme, element: &RectElement) -> String {
        render_element(theme, element, Point::new(1.0, 2.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_node_box() {
        let svg = rendered(&Theme::default(), &RectElement::node(Size::new(10.0, 20.0)));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("width=\"10\""));
    }

    #[test]
    fn test_node_shape_from_config() {
        let style = StyleConfig::default().with_node_shape(NodeShape::Ellipse);
        let theme = Theme::from_config(&AppConfig::new(LayoutConfig::default(), style)).unwrap();
        let svg = rendered(&theme, &RectElement::node(Size::new(10.0, 20.0)));
        assert!(svg.contains("<ellipse"));
        assert!(!svg.contains("<rect"));

        let style = StyleConfig::default().with_node_shape(NodeShape::Hidden);
        let theme = Theme::from_config(&AppConfig::new(LayoutConfig::default(), style)).unwrap();
        assert!(rendered(&theme, &RectElement::node(Size::new(10.0, 20.0))).is_empty());
    }

    #[test]
    fn test_string_is_text() {
        let svg = rendered(&Theme::default(), &RectElement::string("hi", Size::new(15.0, 15.0)));
        assert!(svg.contains("data-layer=\"text\""));
        assert!(svg.contains(">hi<"));
    }

    #[test]
    fn test_array_frame_separators() {
        let frame = RectElement::array_frame(Size::new(40.0, 20.0), vec![13.0, 26.0]);
        let svg = rendered(&Theme::default(), &frame);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("x1=\"14\""));
    }

    #[test]
    fn test_markers() {
        let theme = Theme::default();
        assert!(rendered(&theme, &RectElement::pointer_source(Size::new(8.0, 8.0))).contains("<circle"));
        assert!(rendered(&theme, &RectElement::null(Size::new(6.0, 8.0))).contains("<polygon"));
    }
}
