//! Drawing controller: gesture state machine, undo stack, and operations.

use crate::color::parse_hex_color;
use crate::export::{encode_png, ExportError};
use crate::input::PointerEvent;
use crate::raster;
use crate::surface::{Snapshot, Surface};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::Point;

/// Maximum number of undo snapshots to keep.
///
/// Each snapshot is a full copy of the surface, so the stack is capped and
/// the oldest entry dropped once the cap is exceeded.
const MAX_UNDO_HISTORY: usize = 50;

/// State of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is in progress.
    ///
    /// The anchor is the pointer-down position for shape tools, and the
    /// last sampled position for freehand strokes.
    Active { anchor: Point },
}

/// Owns the surface, the undo stack, the tool configuration, and the
/// in-progress gesture state, and translates pointer input into surface
/// mutations.
///
/// All operations are synchronous and expected to run on a single thread in
/// event-arrival order.
#[derive(Debug, Clone)]
pub struct CanvasController {
    surface: Surface,
    undo_stack: Vec<Snapshot>,
    gesture: Gesture,
    mode: ToolKind,
    settings: ToolSettings,
}

impl CanvasController {
    /// Create a controller owning the given surface.
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            undo_stack: Vec::new(),
            gesture: Gesture::Idle,
            mode: ToolKind::default(),
            settings: ToolSettings::default(),
        }
    }

    /// The surface being drawn on.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The active tool.
    pub fn mode(&self) -> ToolKind {
        self.mode
    }

    /// The current stroke settings.
    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Whether an undo step is available (the UI's undo-enable signal).
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a gesture is currently in progress.
    pub fn is_gesture_active(&self) -> bool {
        matches!(self.gesture, Gesture::Active { .. })
    }

    /// Begin a gesture at the given pointer position.
    ///
    /// Pushes exactly one snapshot of the current surface, unconditionally:
    /// even a gesture that never draws anything consumes an undo slot.
    /// Coordinates are not clamped; an out-of-bounds gesture simply misses
    /// the surface.
    pub fn begin_gesture(&mut self, x: f64, y: f64) {
        self.undo_stack.push(self.surface.snapshot());
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
        self.gesture = Gesture::Active {
            anchor: Point::new(x, y),
        };
    }

    /// Re-anchor an in-progress gesture without touching the surface.
    ///
    /// Called when the pointer re-enters the surface mid-gesture, so the
    /// next sample does not draw a segment from the stale exit position.
    /// No-op when no gesture is active.
    pub fn continue_gesture(&mut self, x: f64, y: f64) {
        if let Gesture::Active { anchor } = &mut self.gesture {
            *anchor = Point::new(x, y);
        }
    }

    /// Feed a pointer-move sample into the active gesture.
    ///
    /// Freehand tools composite a segment from the anchor and advance it;
    /// shape tools restore the pre-gesture snapshot and redraw the outline
    /// from the original anchor (rubber-band preview). No-op when no
    /// gesture is active.
    pub fn sample(&mut self, x: f64, y: f64) {
        let Gesture::Active { anchor } = self.gesture else {
            return;
        };
        let point = Point::new(x, y);
        let color = self.settings.stroke_color.into();
        let width = self.settings.stroke_width;
        let op = self.mode.composite_op();

        match self.mode {
            ToolKind::Draw | ToolKind::Erase => {
                raster::stroke_segment(&mut self.surface, anchor, point, width, color, op);
                self.gesture = Gesture::Active { anchor: point };
            }
            ToolKind::Rectangle => {
                self.restore_gesture_base();
                raster::stroke_rect(&mut self.surface, anchor, point, width, color, op);
            }
            ToolKind::Ellipse => {
                self.restore_gesture_base();
                let center = Point::new(
                    anchor.x + (point.x - anchor.x) / 2.0,
                    anchor.y + (point.y - anchor.y) / 2.0,
                );
                let radius_x = (point.x - anchor.x).abs() / 2.0;
                let radius_y = (point.y - anchor.y).abs() / 2.0;
                raster::stroke_ellipse(&mut self.surface, center, radius_x, radius_y, width, color, op);
            }
        }
    }

    /// Restore the snapshot taken at gesture start, without popping it.
    fn restore_gesture_base(&mut self) {
        if let Some(snapshot) = self.undo_stack.last() {
            self.surface.restore(snapshot);
        }
    }

    /// End the current gesture.
    ///
    /// The snapshot taken at gesture start stays on the stack, so the whole
    /// gesture can be undone.
    pub fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Pop the latest snapshot and restore it, discarding everything drawn
    /// since it was taken. No-op when the stack is empty.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.surface.restore(&snapshot);
        }
    }

    /// Wipe the surface fully transparent.
    ///
    /// Clearing does not push a snapshot: a full clear is not undoable.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Switch the active tool.
    ///
    /// The compositing rule follows the tool (erase subtracts alpha,
    /// everything else paints over), and the tool's glyph becomes the
    /// pointer cursor; both affect subsequent samples only.
    pub fn set_mode(&mut self, mode: ToolKind) {
        self.mode = mode;
        log::debug!("tool switched to {} {}", mode.name(), mode.glyph());
    }

    /// Set the stroke color from a hex-like string.
    ///
    /// Takes effect on the next sample, not retroactively.
    pub fn set_color(&mut self, color: &str) {
        self.settings.stroke_color = parse_hex_color(color);
    }

    /// Set the stroke width in pixels.
    ///
    /// The input widget constrains the range (1-50); no further validation
    /// happens here. Takes effect on the next sample, not retroactively.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.settings.stroke_width = width;
    }

    /// Encode the current surface as a PNG image.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(&self.surface)
    }

    /// Dispatch a pointer event to the matching gesture operation.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { position } => self.begin_gesture(position.x, position.y),
            PointerEvent::Move { position } => self.sample(position.x, position.y),
            PointerEvent::Enter { position } => self.continue_gesture(position.x, position.y),
            PointerEvent::Release => self.end_gesture(),
        }
    }
}
