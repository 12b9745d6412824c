//! InkPad Core Library
//!
//! Platform-agnostic raster surface, tool, and undo model for the InkPad
//! drawing pad.

pub mod color;
pub mod controller;
pub mod export;
pub mod input;
pub mod raster;
pub mod surface;
pub mod tools;

pub use color::{parse_hex_color, SerializableColor};
pub use controller::CanvasController;
pub use export::{encode_png, ExportError};
pub use input::PointerEvent;
pub use surface::{CompositeOp, Snapshot, Surface, SurfaceError};
pub use tools::{ToolKind, ToolSettings};
