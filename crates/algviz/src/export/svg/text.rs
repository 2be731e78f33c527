//! Text labels: measuring and rendering.
//!
//! Shaped measurement goes through a process-wide cosmic-text [`FontSystem`],
//! which is expensive to build and is therefore created once, on first use.

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::node::{Text as SvgText, element as svg_element};

use algviz_core::{
    color::Color,
    geometry::{Point, Size},
};

/// Line height of shaped text relative to its font size.
const SHAPED_LINE_HEIGHT: f32 = 1.33 * 1.15;

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

/// Lines of a label; an empty label still has one (empty) line.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Monospace estimate: each glyph is half the font size wide, each line one
/// font size tall.
pub fn monospace_size(text: &str, font_size: f32) -> Size {
    let lines = lines(text);
    let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    Size::new(
        longest as f32 * font_size / 2.0,
        lines.len() as f32 * font_size,
    )
}

/// Size of `text` shaped with the system fonts.
pub fn shaped_size(text: &str, font_family: &str, font_size: f32) -> Size {
    TEXT_MANAGER
        .get_or_init(TextManager::new)
        .calculate_text_size(text, font_family, font_size)
}

/// Height of one shaped line at `font_size`.
pub fn shaped_line_height(font_size: f32) -> f32 {
    font_size * SHAPED_LINE_HEIGHT
}

/// A centered, multi-line `<text>` filling a box of `size` whose center is
/// `center`. Lines are spread evenly over the box height.
pub fn render_text(
    text: &str,
    center: Point,
    size: Size,
    font_family: &str,
    font_size: f32,
    color: Color,
) -> svg_element::Text {
    let lines = lines(text);
    let line_height = size.height() / lines.len() as f32;
    let y_offset = -(size.height() + line_height) / 2.0;

    let mut rendered = svg_element::Text::new("")
        .set("x", center.x())
        .set("y", center.y() + y_offset)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", font_family)
        .set("font-size", font_size)
        .set("fill", color.to_string());

    for line in lines {
        let tspan = svg_element::TSpan::new("")
            .set("x", center.x())
            .set("dy", line_height)
            .add(SvgText::new(line));
        rendered = rendered.add(tspan);
    }
    rendered
}

/// Owns the font database used for shaped measurement.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    fn calculate_text_size(&self, text: &str, font_family: &str, font_size: f32) -> Size {
        let line_count = lines(text).len() as f32;
        if text.is_empty() {
            return Size::new(0.0, shaped_line_height(font_size));
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = font_size * 1.33;
        let metrics = Metrics::new(font_size_px, shaped_line_height(font_size));

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(font_family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let max_width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0, f32::max);
        let max_width = if max_width > 0.0 {
            max_width
        } else {
            // No usable font: fall back to an average glyph width.
            text.chars().count() as f32 * font_size_px * 0.55
        };

        // Blank lines produce no runs, so height comes from the line count.
        Size::new(max_width, line_count * metrics.line_height)
    }
}
