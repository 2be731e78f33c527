//! Resolved painting styles.
//!
//! A [`Theme`] is the validated form of the style configuration: colors are
//! parsed, sizes derived. It is also the [`SizeHint`] the layouts are built
//! against, so that what gets measured is what gets painted.

use algviz_core::{color::Color, geometry::Size};

use super::text;
use crate::{
    config::{AppConfig, NodeShape, StyleConfig, TextMeasure},
    hint::SizeHint,
};

#[derive(Debug, Clone)]
pub struct Theme {
    margin: f32,
    tree_level_gap: f32,
    font_size: f32,
    font_family: String,
    text_measure: TextMeasure,
    node_shape: NodeShape,
    pointer_size: Size,
    null_size: Size,
    stroke_width: f32,
    stroke_color: Color,
    node_fill_opacity: f32,
    arrow_color: Color,
    arrow_width: f32,
    background_color: Option<Color>,
}

impl Theme {
    /// Builds the theme described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first color that fails to parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let style: &StyleConfig = config.style();
        Ok(Self {
            margin: style.margin(),
            tree_level_gap: config.layout().tree_level_gap() * style.margin(),
            font_size: style.font_size(),
            font_family: style.font_family().to_string(),
            text_measure: style.text_measure(),
            node_shape: style.node_shape(),
            pointer_size: style.pointer_size(),
            null_size: style.null_size(),
            stroke_width: style.stroke_width(),
            stroke_color: style.stroke_color()?,
            node_fill_opacity: style.node_fill_opacity(),
            arrow_color: style.arrow_color()?,
            arrow_width: style.arrow_width(),
            background_color: style.background_color()?,
        })
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn node_fill_opacity(&self) -> f32 {
        self.node_fill_opacity
    }

    pub fn arrow_color(&self) -> Color {
        self.arrow_color
    }

    pub fn arrow_width(&self) -> f32 {
        self.arrow_width
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Font size to paint a label whose lines are `line_height` tall.
    ///
    /// Equals the configured size unless the label was scaled.
    pub fn font_size_for(&self, line_height: f32) -> f32 {
        let nominal = match self.text_measure {
            TextMeasure::Monospace => self.font_size,
            TextMeasure::Shaped => text::shaped_line_height(self.font_size),
        };
        if nominal > 0.0 {
            self.font_size * line_height / nominal
        } else {
            self.font_size
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            margin: 7.0,
            tree_level_gap: 21.0,
            font_size: 15.0,
            font_family: "monospace".to_string(),
            text_measure: TextMeasure::Monospace,
            node_shape: NodeShape::Box,
            pointer_size: Size::new(8.0, 8.0),
            null_size: Size::new(6.0, 8.0),
            stroke_width: 1.5,
            stroke_color: Color::default(),
            node_fill_opacity: 0.1,
            arrow_color: Color::default(),
            arrow_width: 2.0,
            background_color: None,
        }
    }
}

impl SizeHint for Theme {
    fn string_size(&self, text: &str) -> Size {
        match self.text_measure {
            TextMeasure::Monospace => text::monospace_size(text, self.font_size),
            TextMeasure::Shaped => text::shaped_size(text, &self.font_family, self.font_size),
        }
    }

    fn pointer_source_size(&self) -> Size {
        self.pointer_size
    }

    fn null_size(&self) -> Size {
        self.null_size
    }

    fn margin(&self) -> f32 {
        self.margin
    }

    fn array_border_margin(&self) -> f32 {
        self.stroke_width * 4.0
    }

    fn array_cell_sep(&self) -> f32 {
        self.array_border_margin()
    }

    fn tree_level_gap(&self) -> f32 {
        self.tree_level_gap
    }
}
