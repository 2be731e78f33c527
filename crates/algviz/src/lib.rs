//! algviz - draws data structures as SVG pictures.
//!
//! An object graph (decoded from a JSON snapshot by `algviz-parser`) is laid
//! out recursively: trees, arrays, graphs and nodes each have a layout that
//! nests the layouts of their parts, and pointers become arrows stitched
//! between independently built sub-pictures. The result is painted as a
//! single SVG document.

pub mod config;
pub mod element;
pub mod export;
pub mod hint;
pub mod layout;

mod error;

pub use algviz_core::{anchor, color, geometry, identifier, structure};

pub use error::AlgvizError;

use log::{debug, info, trace};

use algviz_core::{
    geometry::Extent,
    structure::{ObjectGraph, ObjectRef, Snapshot},
};

use config::AppConfig;
use export::svg::{SvgPainter, Theme};
use layout::{Layout, LayoutDispatch};

/// Builder for decoding, laying out and painting snapshots.
///
/// # Examples
///
/// ```rust
/// use algviz::{Visualizer, config::AppConfig};
///
/// let source = r#"[{"uid": "s", "type": "string", "data": "hello"}]"#;
///
/// let visualizer = Visualizer::new(AppConfig::default());
/// let snapshot = visualizer.parse(source).expect("Failed to parse");
/// let root = visualizer.select_root(&snapshot, None, None).expect("Nothing to draw");
/// let svg = visualizer.render_svg(&snapshot, root).expect("Failed to render");
/// assert!(svg.contains("hello"));
/// ```
#[derive(Default)]
pub struct Visualizer {
    config: AppConfig,
}

impl Visualizer {
    /// Create a new visualizer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Decode a document holding one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AlgvizError::Parse`] carrying the source for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Snapshot, AlgvizError> {
        info!("Parsing snapshot");
        let snapshot =
            algviz_parser::decode_snapshot(source).map_err(|err| AlgvizError::new_parse_error(err, source))?;
        debug!(objects = snapshot.graph().len(); "Snapshot parsed successfully");
        trace!(snapshot:?; "Parsed snapshot");
        Ok(snapshot)
    }

    /// Decode a document holding one snapshot or a list of them.
    ///
    /// # Errors
    ///
    /// Returns [`AlgvizError::Parse`] for the first snapshot that fails.
    pub fn parse_history(&self, source: &str) -> Result<Vec<Snapshot>, AlgvizError> {
        info!("Parsing snapshot history");
        algviz_parser::decode_snapshots(source).map_err(|err| AlgvizError::new_parse_error(err, source))
    }

    /// Picks the object to draw: the object bound to `var`, else the object
    /// with `uid`, else the first top-level object.
    ///
    /// # Errors
    ///
    /// Returns [`AlgvizError::MissingRoot`] when the requested object does
    /// not exist or the snapshot is empty.
    pub fn select_root(
        &self,
        snapshot: &Snapshot,
        var: Option<&str>,
        uid: Option<&str>,
    ) -> Result<ObjectRef, AlgvizError> {
        if let Some(var) = var {
            return snapshot.var(var).ok_or_else(|| {
                let mut known: Vec<&str> = snapshot.var_names().collect();
                known.sort_unstable();
                AlgvizError::MissingRoot(format!(
                    "no variable named `{var}`, known variables: [{}]",
                    known.join(", ")
                ))
            });
        }
        if let Some(uid) = uid {
            return snapshot
                .graph()
                .find(uid)
                .ok_or_else(|| AlgvizError::MissingRoot(format!("no object with uid `{uid}`")));
        }
        snapshot
            .roots()
            .first()
            .copied()
            .ok_or_else(|| AlgvizError::MissingRoot("the snapshot is empty".to_string()))
    }

    /// Lay out `root` and everything it reaches.
    ///
    /// # Errors
    ///
    /// Returns [`AlgvizError::Config`] for invalid styles and
    /// [`AlgvizError::Layout`] for structures that cannot be drawn.
    pub fn layout(&self, graph: &ObjectGraph, root: ObjectRef) -> Result<Layout, AlgvizError> {
        let theme = self.theme()?;
        self.layout_with(&theme, graph, root)
    }

    /// Lay out and paint `root` of `snapshot` as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns `AlgvizError` for configuration, layout or painting errors.
    pub fn render_svg(&self, snapshot: &Snapshot, root: ObjectRef) -> Result<String, AlgvizError> {
        let theme = self.theme()?;
        let layout = self.layout_with(&theme, snapshot.graph(), root)?;
        info!(width = layout.width(), height = layout.height(); "Layout calculated");

        let svg = SvgPainter::new(theme).paint(&layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    fn theme(&self) -> Result<Theme, AlgvizError> {
        Theme::from_config(&self.config).map_err(AlgvizError::Config)
    }

    fn layout_with(&self, theme: &Theme, graph: &ObjectGraph, root: ObjectRef) -> Result<Layout, AlgvizError> {
        let dispatch = LayoutDispatch::from_overrides(self.config.layout().overrides())?;
        Ok(layout::create_layout(graph, root, &dispatch, theme)?)
    }
}
