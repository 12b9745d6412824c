//! Raster surface: pixel store, compositing rules, and snapshots.

use peniko::Color;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    ZeroArea { width: u32, height: u32 },
}

/// Pixel compositing rule applied by paint operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    /// Normal painting: the source color is blended over the destination.
    #[default]
    SourceOver,
    /// Erasing: the source alpha is subtracted from the destination alpha.
    DestinationOut,
}

/// An immutable capture of the full surface contents.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixels: Box<[u8]>,
}

impl Snapshot {
    /// Size of the captured buffer in bytes.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// A fixed-size RGBA8 raster buffer.
///
/// Dimensions are set once at construction and never change; there is no
/// resize handling. The buffer starts fully transparent.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a transparent surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroArea { width, height });
        }
        let len = width as usize * height as usize * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major from the top-left corner.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Read back a pixel as `[r, g, b, a]`. `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| {
            [
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ]
        })
    }

    /// Composite `color` onto the pixel at `(x, y)` with the given rule.
    ///
    /// Writes outside the surface are silently dropped, so callers never
    /// need to pre-clip.
    pub fn composite(&mut self, x: i32, y: i32, color: Color, op: CompositeOp) {
        let Some(i) = self.index(x, y) else { return };
        let src = color.to_rgba8();
        let sa = src.a as f32 / 255.0;
        let da = self.pixels[i + 3] as f32 / 255.0;
        match op {
            CompositeOp::SourceOver => {
                let out_a = sa + da * (1.0 - sa);
                if out_a <= 0.0 {
                    self.pixels[i..i + 4].fill(0);
                    return;
                }
                let blend = |s: u8, d: u8| -> u8 {
                    let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
                    c.round().clamp(0.0, 255.0) as u8
                };
                self.pixels[i] = blend(src.r, self.pixels[i]);
                self.pixels[i + 1] = blend(src.g, self.pixels[i + 1]);
                self.pixels[i + 2] = blend(src.b, self.pixels[i + 2]);
                self.pixels[i + 3] = (out_a * 255.0).round() as u8;
            }
            CompositeOp::DestinationOut => {
                // Color channels are irrelevant when erasing; only the
                // destination alpha shrinks.
                let out_a = da * (1.0 - sa);
                self.pixels[i + 3] = (out_a * 255.0).round() as u8;
                if self.pixels[i + 3] == 0 {
                    self.pixels[i..i + 3].fill(0);
                }
            }
        }
    }

    /// Wipe every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Capture the entire surface contents.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Restore a previously captured snapshot, pixel for pixel.
    ///
    /// A snapshot taken from a surface of different dimensions is ignored.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.pixels.len() != self.pixels.len() {
            log::warn!(
                "ignoring snapshot of {} bytes for a {} byte surface",
                snapshot.pixels.len(),
                self.pixels.len()
            );
            return;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
    }
}
