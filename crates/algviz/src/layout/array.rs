//! Array layouts.
//!
//! The framed layout draws a row of equal cells inside an outline, like a
//! textbook array. The linked layout puts items next to each other without a
//! frame, recursing into the tail of the array.

use log::trace;

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point, Size},
    structure::{ObjectRef, Structure},
};

use super::{Layout, LayoutError, LayoutKind, dispatch::LayoutContext};
use crate::element::RectElement;

fn array_items<'a>(
    ctx: &LayoutContext<'a>,
    handle: ObjectRef,
    layout: LayoutKind,
) -> Result<&'a [ObjectRef], LayoutError> {
    let object = ctx.object(handle);
    match object.structure() {
        Structure::Array { items } => Ok(items),
        _ => Err(LayoutError::Unsupported {
            layout,
            kind: object.kind(),
            uid: object.uid(),
        }),
    }
}

/// Items centered in equal cells of a framed row.
///
/// Cells are as large as the largest item. An empty array keeps one empty
/// cell the size of a null marker. The frame is the picture of the array
/// itself, so pointers to the array land on it.
pub(super) fn framed(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let items = array_items(ctx, handle, LayoutKind::Array)?;
    let cells = items
        .iter()
        .map(|&item| ctx.layout_object(item))
        .collect::<Result<Vec<_>, _>>()?;

    let hint = ctx.hint();
    let border = hint.array_border_margin();
    let sep = hint.array_cell_sep();
    let cell = if cells.is_empty() {
        hint.null_size()
    } else {
        cells
            .iter()
            .fold(Size::default(), |largest, cell| largest.max(cell.size()))
    };

    let slots = cells.len().max(1);
    let stride = cell.width() + sep;
    let size = Size::new(
        slots as f32 * cell.width() + (slots - 1) as f32 * sep + 2.0 * border,
        cell.height() + 2.0 * border,
    );
    let separators = (1..slots)
        .map(|idx| border + idx as f32 * stride - sep / 2.0)
        .collect();
    trace!(uid:% = ctx.object(handle).uid(), cell:?, slots; "Array cells");

    let mut layout = Layout::new("array");
    let frame = layout.add_rect_element(
        RectElement::array_frame(size, separators),
        Point::default(),
        Anchor::TopLeft,
        Some(ctx.object(handle)),
    )?;
    layout.set_primary(frame);
    for (idx, item) in cells.into_iter().enumerate() {
        let center = Point::new(
            border + idx as f32 * stride + cell.width() / 2.0,
            border + cell.height() / 2.0,
        );
        layout.add_child(item, center, Anchor::Center)?;
    }
    layout.finalize(size, Point::default(), Anchor::TopLeft)?;
    Ok(layout)
}

/// Head item, then the rest of the array laid out the same way, a margin
/// apart and vertically centered.
pub(super) fn linked(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let items = array_items(ctx, handle, LayoutKind::LinkedArray)?;
    linked_items(ctx, items)
}

fn linked_items(ctx: &mut LayoutContext<'_>, items: &[ObjectRef]) -> Result<Layout, LayoutError> {
    let mut layout = Layout::new("linked_array");
    let Some((&head, tail)) = items.split_first() else {
        layout.finalize(Size::default(), Point::default(), Anchor::TopLeft)?;
        return Ok(layout);
    };

    let head = ctx.layout_object(head)?;
    let head_width = head.width();
    let rest = if tail.is_empty() {
        None
    } else {
        Some(linked_items(ctx, tail)?)
    };
    let height = rest
        .as_ref()
        .map_or(head.height(), |rest| head.height().max(rest.height()));

    if let Some(element) = head.primary_element() {
        layout.set_primary(element);
    }
    layout.add_child(head, Point::new(0.0, height / 2.0), Anchor::Left)?;
    let mut width = head_width;
    if let Some(rest) = rest {
        width += ctx.hint().margin();
        let rest_width = rest.width();
        layout.add_child(rest, Point::new(width, height / 2.0), Anchor::Left)?;
        width += rest_width;
    }
    layout.finalize(Size::new(width, height), Point::default(), Anchor::TopLeft)?;
    Ok(layout)
}
