//! PNG export of the surface.

use crate::surface::Surface;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Encode the surface as an RGBA8 PNG and return the encoded bytes.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(surface.data())?;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::CanvasController;
    use crate::tools::ToolKind;

    fn decode(data: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(data);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_dimensions() {
        let surface = Surface::new(64, 48).unwrap();
        let data = encode_png(&surface).unwrap();
        let (info, _) = decode(&data);
        assert_eq!(info.width, 64);
        assert_eq!(info.height, 48);
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
    }

    #[test]
    fn test_exported_red_diagonal_decodes_correctly() {
        let mut c = CanvasController::new(Surface::new(32, 32).unwrap());
        c.set_mode(ToolKind::Draw);
        c.set_color("#ff0000");
        c.set_stroke_width(1.0);
        c.begin_gesture(0.0, 0.0);
        c.sample(31.0, 31.0);
        c.end_gesture();

        let data = c.export_png().unwrap();
        let (info, pixels) = decode(&data);
        assert_eq!(info.width, 32);

        let pixel = |x: usize, y: usize| {
            let i = (y * 32 + x) * 4;
            [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
        };
        // Red along the diagonal, transparent elsewhere.
        for i in [0usize, 10, 20, 31] {
            assert_eq!(pixel(i, i), [255, 0, 0, 255]);
        }
        assert_eq!(pixel(30, 2)[3], 0);
        assert_eq!(pixel(2, 30)[3], 0);
    }

    #[test]
    fn test_blank_surface_exports_transparent() {
        let surface = Surface::new(8, 8).unwrap();
        let data = encode_png(&surface).unwrap();
        let (_, pixels) = decode(&data);
        assert!(pixels.iter().all(|&b| b == 0));
    }
}
