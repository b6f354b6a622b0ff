use crate::domain::ports::{Decoder, Frame};

/// QR decoding over rqrr. Stateless; anything the library rejects (no grid,
/// damaged code, malformed buffer) is simply "no code found".
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl Decoder for RqrrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let width = frame.width as usize;
        let height = frame.height as usize;
        if width == 0 || height == 0 || frame.luma.len() != width * height {
            return None;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            frame.luma[y * width + x]
        });
        let grids = prepared.detect_grids();
        let grid = grids.first()?;
        grid.decode().ok().map(|(_, content)| content)
    }
}

#[cfg(test)]
mod tests {
    use qrcode::{Color, QrCode};

    use super::*;

    /// Rasterise a code by hand: scaled modules plus a quiet zone, black on
    /// white.
    fn frame_with_code(content: &str) -> Frame {
        let code = QrCode::new(content.as_bytes()).expect("encodable content");
        let modules = code.width();
        let colors = code.to_colors();

        let scale = 8;
        let quiet = 4;
        let dim = (modules + 2 * quiet) * scale;
        let mut luma = vec![255u8; dim * dim];
        for y in 0..modules {
            for x in 0..modules {
                if colors[y * modules + x] != Color::Dark {
                    continue;
                }
                for dy in 0..scale {
                    let row = ((y + quiet) * scale + dy) * dim + (x + quiet) * scale;
                    for dx in 0..scale {
                        luma[row + dx] = 0;
                    }
                }
            }
        }

        Frame {
            width: dim as u32,
            height: dim as u32,
            luma,
        }
    }

    #[test]
    fn decodes_a_rendered_code() {
        let decoder = RqrrDecoder;
        assert_eq!(
            decoder.decode(&frame_with_code("M-100")).as_deref(),
            Some("M-100")
        );
    }

    #[test]
    fn noise_yields_no_code() {
        let decoder = RqrrDecoder;
        let luma: Vec<u8> = (0..64 * 64).map(|i| (i * 37 % 255) as u8).collect();
        let frame = Frame {
            width: 64,
            height: 64,
            luma,
        };
        assert_eq!(decoder.decode(&frame), None);
    }

    #[test]
    fn mismatched_buffer_is_no_code_not_a_panic() {
        let decoder = RqrrDecoder;
        let frame = Frame {
            width: 100,
            height: 100,
            luma: vec![0; 10],
        };
        assert_eq!(decoder.decode(&frame), None);
    }
}
