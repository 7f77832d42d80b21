//! Where the trigger and the panel go.
//!
//! Geometry is recomputed on demand from the position variant, the layout
//! state and the viewport.  There is no per-variant table: a new variant
//! only needs a new arm in [`geometry`].

use ratatui::layout::Rect;

use crate::config::{Dimension, Position};

/// Gap between the widget and the screen edge, in cells.
pub const EDGE_INSET: u16 = 1;
pub const TRIGGER_WIDTH: u16 = 3;
pub const TRIGGER_HEIGHT: u16 = 1;
/// Corner panels never grow wider than this, whatever the config says.
pub const CORNER_MAX_WIDTH: u16 = 90;
pub const EXPANDED_WIDTH_PCT: u16 = 80;
pub const EXPANDED_HEIGHT_PCT: u16 = 70;
pub const EXPANDED_MAX_WIDTH: u16 = 160;
pub const EXPANDED_MAX_HEIGHT: u16 = 48;

/// The screen edge(s) a panel hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Full width along the bottom edge.
    BottomEdge,
}

impl From<Position> for Anchor {
    fn from(position: Position) -> Self {
        match position {
            Position::TopLeft => Anchor::TopLeft,
            Position::TopRight => Anchor::TopRight,
            Position::BottomLeft => Anchor::BottomLeft,
            Position::BottomRight => Anchor::BottomRight,
            Position::Pane => Anchor::BottomEdge,
        }
    }
}

impl Anchor {
    fn is_left(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopRight)
    }
}

/// The parts of the layout state geometry depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryInput {
    pub collapsed: bool,
    pub expanded: bool,
    pub pane_height: Dimension,
    /// Extra downward translation of an opening pane.
    pub slide_offset: u16,
}

/// Configured corner panel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDims {
    pub width: Dimension,
    pub max_height: Dimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub anchor: Anchor,
    /// Full panel size before translation and clipping.
    pub width: u16,
    pub height: u16,
    /// Rows the panel is pushed down from its resting place.
    pub offset_y: u16,
    /// On-screen part of the panel.  Empty while fully translated away.
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub trigger: Rect,
    pub panel: PanelGeometry,
}

/// Compute trigger and panel placement inside `viewport`.
pub fn geometry(
    position: Position,
    input: GeometryInput,
    dims: PanelDims,
    viewport: Rect,
) -> Geometry {
    let anchor = Anchor::from(position);
    let panel = match anchor {
        Anchor::BottomEdge => pane_panel(input, viewport),
        corner => corner_panel(corner, input.expanded, dims, viewport),
    };
    // The pane's trigger sits in the bottom-right corner.
    let trigger_anchor = if anchor == Anchor::BottomEdge {
        Anchor::BottomRight
    } else {
        anchor
    };
    let trigger = place_in_corner(trigger_anchor, TRIGGER_WIDTH, TRIGGER_HEIGHT, viewport);
    Geometry { trigger, panel }
}

fn corner_panel(anchor: Anchor, expanded: bool, dims: PanelDims, viewport: Rect) -> PanelGeometry {
    let (width, height) = if expanded {
        (
            Dimension::Percent(EXPANDED_WIDTH_PCT)
                .resolve(viewport.width)
                .min(EXPANDED_MAX_WIDTH),
            Dimension::Percent(EXPANDED_HEIGHT_PCT)
                .resolve(viewport.height)
                .min(EXPANDED_MAX_HEIGHT),
        )
    } else {
        (
            dims.width.resolve(viewport.width).min(CORNER_MAX_WIDTH),
            dims.max_height.resolve(viewport.height),
        )
    };
    let rect = place_in_corner(anchor, width, height, viewport);
    PanelGeometry {
        anchor,
        width: rect.width,
        height: rect.height,
        offset_y: 0,
        rect,
    }
}

fn pane_panel(input: GeometryInput, viewport: Rect) -> PanelGeometry {
    let height = input.pane_height.resolve(viewport.height).min(viewport.height);
    let offset_y = if input.collapsed {
        height
    } else {
        input.slide_offset.min(height)
    };
    let top = viewport.bottom() - height + offset_y;
    PanelGeometry {
        anchor: Anchor::BottomEdge,
        width: viewport.width,
        height,
        offset_y,
        rect: Rect::new(viewport.x, top, viewport.width, height - offset_y),
    }
}

/// A `width`×`height` box at the inset of `anchor`, shrunk to fit.
fn place_in_corner(anchor: Anchor, width: u16, height: u16, viewport: Rect) -> Rect {
    let w = width.min(viewport.width.saturating_sub(2 * EDGE_INSET));
    let h = height.min(viewport.height.saturating_sub(2 * EDGE_INSET));
    let x = if anchor.is_left() {
        viewport.x + EDGE_INSET.min(viewport.width)
    } else {
        viewport.x + viewport.width.saturating_sub(EDGE_INSET + w)
    };
    let y = if anchor.is_top() {
        viewport.y + EDGE_INSET.min(viewport.height)
    } else {
        viewport.y + viewport.height.saturating_sub(EDGE_INSET + h)
    };
    Rect::new(x, y, w, h)
}
