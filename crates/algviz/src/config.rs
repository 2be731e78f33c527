//! Configuration types for algviz rendering.
//!
//! This module provides configuration structures that control how object
//! graphs are laid out and painted. All types implement [`serde::Deserialize`]
//! for loading from external sources; every field is optional and falls back
//! to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Layout choices per structure kind and tree spacing.
//! - [`StyleConfig`] - Sizes, fonts and colors used by the SVG painter.
//!
//! # Example
//!
//! ```
//! # use algviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().margin(), 7.0);
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use algviz_core::{color::Color, geometry::Size};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout selection and spacing.
///
/// `overrides` maps structure kind names (`array`, `treenode`, ...) to layout
/// names (`linked_array`, `node`, ...) and takes precedence over the built-in
/// table. A layout requested in an object's own metadata still wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    overrides: HashMap<String, String>,

    /// Vertical gap between tree levels, in margins.
    tree_level_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            tree_level_gap: 3.0,
        }
    }
}

impl LayoutConfig {
    /// Adds an override, replacing any previous one for `kind`.
    pub fn with_override(mut self, kind: impl Into<String>, layout: impl Into<String>) -> Self {
        self.overrides.insert(kind.into(), layout.into());
        self
    }

    /// Returns the `(structure kind, layout)` override pairs.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(kind, layout)| (kind.as_str(), layout.as_str()))
    }

    pub fn tree_level_gap(&self) -> f32 {
        self.tree_level_gap
    }
}

/// How text labels are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMeasure {
    /// Every glyph is half as wide as the font size.
    #[default]
    Monospace,
    /// Shaped against the system fonts.
    Shaped,
}

/// Outline drawn around container nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    #[default]
    Box,
    Ellipse,
    /// Only the contents are drawn.
    #[serde(rename = "none")]
    Hidden,
}

/// Visual styling configuration for rendered pictures.
///
/// Colors are kept as strings and parsed on access, so that a bad color is
/// reported when the painter is built rather than when the file is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    margin: f32,
    font_size: f32,
    font_family: String,
    text_measure: TextMeasure,
    node_shape: NodeShape,
    pointer_size: [f32; 2],
    null_size: [f32; 2],
    stroke_width: f32,
    stroke_color: String,
    node_fill_opacity: f32,
    arrow_color: String,
    arrow_width: f32,
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            margin: 7.0,
            font_size: 15.0,
            font_family: "monospace".to_string(),
            text_measure: TextMeasure::default(),
            node_shape: NodeShape::default(),
            pointer_size: [8.0, 8.0],
            null_size: [6.0, 8.0],
            stroke_width: 1.5,
            stroke_color: "black".to_string(),
            node_fill_opacity: 0.1,
            arrow_color: "rgb(50, 50, 50)".to_string(),
            arrow_width: 2.0,
            background_color: None,
        }
    }
}

impl StyleConfig {
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn text_measure(&self) -> TextMeasure {
        self.text_measure
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    pub fn pointer_size(&self) -> Size {
        Size::new(self.pointer_size[0], self.pointer_size[1])
    }

    pub fn null_size(&self) -> Size {
        Size::new(self.null_size[0], self.null_size[1])
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn node_fill_opacity(&self) -> f32 {
        self.node_fill_opacity
    }

    pub fn arrow_width(&self) -> f32 {
        self.arrow_width
    }

    /// Returns the parsed outline [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::new(&self.stroke_color).map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    /// Returns the parsed arrow [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn arrow_color(&self) -> Result<Color, String> {
        Color::new(&self.arrow_color).map_err(|err| format!("Invalid arrow color in config: {err}"))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_text_measure(mut self, text_measure: TextMeasure) -> Self {
        self.text_measure = text_measure;
        self
    }

    pub fn with_node_shape(mut self, node_shape: NodeShape) -> Self {
        self.node_shape = node_shape;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let style = config.style();
        assert_eq!(style.font_size(), 15.0);
        assert_eq!(style.font_family(), "monospace");
        assert_eq!(style.text_measure(), TextMeasure::Monospace);
        assert_eq!(style.node_shape(), NodeShape::Box);
        assert_eq!(style.pointer_size(), Size::new(8.0, 8.0));
        assert_eq!(style.null_size(), Size::new(6.0, 8.0));
        assert!(style.stroke_color().is_ok());
        assert!(style.arrow_color().is_ok());
        assert_eq!(config.layout().tree_level_gap(), 3.0);
        assert_eq!(config.layout().overrides().count(), 0);
    }

    #[test]
    fn test_invalid_colors_are_reported_on_access() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        let err = style.background_color().unwrap_err();
        assert!(err.contains("background color"));
    }

    #[test]
    fn test_layout_overrides() {
        let layout = LayoutConfig::default().with_override("array", "linked_array");
        let overrides: Vec<_> = layout.overrides().collect();
        assert_eq!(overrides, vec![("array", "linked_array")]);
    }
}
