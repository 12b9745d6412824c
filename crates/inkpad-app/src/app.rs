//! Application shell: window, event loop, and key bindings.

use std::path::PathBuf;

use clap::Parser;
use inkpad_core::{CanvasController, PointerEvent, Surface, SurfaceError, ToolKind};
use kurbo::Point;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use serde::Serialize;
use thiserror::Error;

/// Name of the exported image file.
const EXPORT_FILE_NAME: &str = "canvas.png";

/// Stroke width bounds enforced by the width keys (the range-input bounds).
const MIN_STROKE_WIDTH: f64 = 1.0;
const MAX_STROKE_WIDTH: f64 = 50.0;

/// Application shell errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window init failed: {0}")]
    WindowInit(String),
    #[error("window update failed: {0}")]
    WindowUpdate(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Command-line configuration.
#[derive(Debug, Parser, Serialize)]
#[command(name = "inkpad", about = "Freehand raster drawing pad")]
pub struct Config {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Initial stroke color as a hex string (e.g. #ff0000).
    #[arg(long, default_value = "#000000")]
    pub color: String,

    /// Initial stroke width in pixels (1-50).
    #[arg(long, default_value_t = 10.0)]
    pub stroke_width: f64,

    /// Directory the exported canvas.png is written to.
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}

/// The running application: controller, window, and presentation buffer.
pub struct App {
    controller: CanvasController,
    window: Window,
    /// 0RGB presentation buffer the surface is composited into each frame.
    frame: Vec<u32>,
    export_dir: PathBuf,
    /// Whether the primary button was down last frame.
    pointer_down: bool,
    /// Whether the pointer was inside the window last frame.
    pointer_inside: bool,
    /// Pointer position last frame, for move detection.
    last_pointer_pos: Option<Point>,
    title: String,
}

impl App {
    /// Build the surface, controller, and window, then run the event loop
    /// until the window closes or Escape is pressed.
    pub fn run(config: Config) -> Result<(), AppError> {
        log::debug!(
            "effective config: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );

        let surface = Surface::new(config.width, config.height)?;
        let mut controller = CanvasController::new(surface);
        controller.set_color(&config.color);
        controller.set_stroke_width(config.stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH));

        let mut window = Window::new(
            "InkPad",
            config.width as usize,
            config.height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| AppError::WindowInit(e.to_string()))?;
        window.set_target_fps(60);

        let frame = vec![0u32; config.width as usize * config.height as usize];
        let mut app = Self {
            controller,
            window,
            frame,
            export_dir: config.export_dir,
            pointer_down: false,
            pointer_inside: false,
            last_pointer_pos: None,
            title: String::new(),
        };
        app.event_loop()
    }

    fn event_loop(&mut self) -> Result<(), AppError> {
        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.handle_keys();
            self.handle_mouse();
            self.update_title();
            self.present()?;
        }
        Ok(())
    }

    /// One-shot key bindings for the commands the toolbar would expose.
    fn handle_keys(&mut self) {
        let pressed = |key| self.window.is_key_pressed(key, KeyRepeat::No);

        if pressed(Key::Key1) {
            self.controller.set_mode(ToolKind::Draw);
        }
        if pressed(Key::Key2) {
            self.controller.set_mode(ToolKind::Erase);
        }
        if pressed(Key::Key3) {
            self.controller.set_mode(ToolKind::Rectangle);
        }
        if pressed(Key::Key4) {
            self.controller.set_mode(ToolKind::Ellipse);
        }

        // Small built-in palette; the CLI sets the initial color.
        if pressed(Key::Key6) {
            self.controller.set_color("#000000");
        }
        if pressed(Key::Key7) {
            self.controller.set_color("#e03131");
        }
        if pressed(Key::Key8) {
            self.controller.set_color("#2f9e44");
        }
        if pressed(Key::Key9) {
            self.controller.set_color("#1971c2");
        }

        if pressed(Key::LeftBracket) || pressed(Key::RightBracket) {
            let delta = if pressed(Key::RightBracket) { 1.0 } else { -1.0 };
            let width = (self.controller.settings().stroke_width + delta)
                .clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
            self.controller.set_stroke_width(width);
            log::debug!("stroke width {width}");
        }

        if pressed(Key::U) {
            // The toolbar disables Undo while the stack is empty.
            if self.controller.can_undo() {
                self.controller.undo();
            } else {
                log::debug!("undo ignored: nothing to undo");
            }
        }
        if pressed(Key::C) {
            self.controller.clear();
        }
        if pressed(Key::S) {
            self.export();
        }
    }

    /// Translate the window's mouse state into pointer events.
    fn handle_mouse(&mut self) {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as f64, y as f64));
        let inside = pos.is_some();

        match (self.pointer_down, down, pos) {
            (false, true, Some(position)) => {
                self.controller.handle_pointer(PointerEvent::Press { position });
            }
            (true, true, Some(position)) => {
                if !self.pointer_inside {
                    // Re-entry mid-gesture: re-anchor so the next move does
                    // not draw a segment from the stale exit position.
                    self.controller.handle_pointer(PointerEvent::Enter { position });
                } else if self.last_pointer_pos != Some(position) {
                    self.controller.handle_pointer(PointerEvent::Move { position });
                }
            }
            (true, false, _) => {
                self.controller.handle_pointer(PointerEvent::Release);
            }
            _ => {}
        }

        self.pointer_down = down;
        self.pointer_inside = inside;
        self.last_pointer_pos = pos;
    }

    fn update_title(&mut self) {
        let mode = self.controller.mode();
        let title = format!(
            "InkPad — {} {} | width {:.0}{}",
            mode.glyph(),
            mode.name(),
            self.controller.settings().stroke_width,
            if self.controller.can_undo() { "" } else { " | empty" },
        );
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    /// Composite the RGBA surface over a white page into the window buffer.
    fn present(&mut self) -> Result<(), AppError> {
        let surface = self.controller.surface();
        let data = surface.data();
        for (i, px) in self.frame.iter_mut().enumerate() {
            let s = &data[i * 4..i * 4 + 4];
            let a = s[3] as u32;
            let over_white = |c: u8| (c as u32 * a + 255 * (255 - a)) / 255;
            *px = (over_white(s[0]) << 16) | (over_white(s[1]) << 8) | over_white(s[2]);
        }
        self.window
            .update_with_buffer(&self.frame, surface.width() as usize, surface.height() as usize)
            .map_err(|e| AppError::WindowUpdate(e.to_string()))
    }

    /// Encode the surface and write `canvas.png` into the export directory.
    ///
    /// Failures are logged and otherwise ignored; exporting never
    /// interrupts drawing.
    fn export(&self) {
        match self.controller.export_png() {
            Ok(bytes) => {
                let path = self.export_dir.join(EXPORT_FILE_NAME);
                match std::fs::write(&path, &bytes) {
                    Ok(()) => log::info!("exported {} bytes to {}", bytes.len(), path.display()),
                    Err(e) => log::error!("writing {} failed: {e}", path.display()),
                }
            }
            Err(e) => log::error!("PNG export failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::parse_from(["inkpad"]);
        assert_eq!(config.width, 960);
        assert_eq!(config.height, 600);
        assert_eq!(config.color, "#000000");
        assert!((config.stroke_width - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::parse_from([
            "inkpad",
            "--width",
            "320",
            "--height",
            "240",
            "--color",
            "#e03131",
            "--stroke-width",
            "3",
        ]);
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.color, "#e03131");
        assert!((config.stroke_width - 3.0).abs() < f64::EPSILON);
    }
}
