//! Drawing tools and stroke settings.

use crate::color::SerializableColor;
use crate::surface::CompositeOp;
use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Freehand pen strokes.
    #[default]
    Draw,
    /// Freehand erasing (clears pixels to transparent).
    Erase,
    /// Axis-aligned rectangle outline with live preview.
    Rectangle,
    /// Ellipse outline with live preview.
    Ellipse,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub fn all() -> [ToolKind; 4] {
        [
            ToolKind::Draw,
            ToolKind::Erase,
            ToolKind::Rectangle,
            ToolKind::Ellipse,
        ]
    }

    /// Display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Draw => "Draw",
            ToolKind::Erase => "Erase",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
        }
    }

    /// Display glyph, used for toolbar buttons and the pointer cursor.
    pub fn glyph(self) -> &'static str {
        match self {
            ToolKind::Draw => "\u{270F}\u{FE0F}",      // pencil
            ToolKind::Erase => "\u{1F9FD}",            // sponge
            ToolKind::Rectangle => "\u{1F532}",        // square button
            ToolKind::Ellipse => "\u{1F534}",          // circle
        }
    }

    /// Compositing rule this tool paints with.
    ///
    /// Erasing subtracts destination alpha; everything else paints normally.
    pub fn composite_op(self) -> CompositeOp {
        match self {
            ToolKind::Erase => CompositeOp::DestinationOut,
            _ => CompositeOp::SourceOver,
        }
    }

    /// Whether this tool rubber-bands a shape preview instead of
    /// accumulating stroke segments.
    pub fn is_shape(self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Ellipse)
    }
}

/// Stroke settings shared by all tools.
///
/// Changes take effect on the next sample, never retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Stroke color; ignored by the eraser.
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 10.0,
        }
    }
}
