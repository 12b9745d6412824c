//! InkPad Application
//!
//! Native shell providing the window, pointer/keyboard input handling, and
//! export of the drawing to a PNG file on disk.

mod app;

pub use app::{App, AppError, Config};
