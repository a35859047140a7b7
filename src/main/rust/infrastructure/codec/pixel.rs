//! Conversions between raw sensor layouts and packed RGB8.

use crate::domain::errors::{DomainError, Result};
use crate::domain::value_objects::PixelFormat;

/// Unpack a raw sensor buffer into RGB8
pub fn to_rgb8(format: PixelFormat, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = format.raw_len(width, height).ok_or_else(|| {
        DomainError::EncodingFailed(format!("{} is not a raw pixel format", format))
    })?;
    if data.len() != expected {
        return Err(DomainError::EncodingFailed(format!(
            "{} buffer of {} bytes does not match {}x{} ({} bytes expected)",
            format,
            data.len(),
            width,
            height,
            expected
        )));
    }

    let pixels = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);

    match format {
        PixelFormat::Rgb888 => rgb.extend_from_slice(data),
        PixelFormat::Grayscale => {
            for &y in data {
                rgb.extend_from_slice(&[y, y, y]);
            }
        }
        PixelFormat::Rgb565 => {
            for px in data.chunks_exact(2) {
                let v = u16::from_be_bytes([px[0], px[1]]);
                let r = ((v >> 11) & 0x1f) as u8;
                let g = ((v >> 5) & 0x3f) as u8;
                let b = (v & 0x1f) as u8;
                rgb.extend_from_slice(&[(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]);
            }
        }
        PixelFormat::Yuv422 => {
            let mut pairs = data.chunks_exact(4);
            for px in &mut pairs {
                let (y0, u, y1, v) = (px[0], px[1], px[2], px[3]);
                rgb.extend_from_slice(&yuv_to_rgb(y0, u, v));
                rgb.extend_from_slice(&yuv_to_rgb(y1, u, v));
            }
            // odd pixel count leaves a trailing Y/U pair
            if let [y, u] = pairs.remainder() {
                rgb.extend_from_slice(&yuv_to_rgb(*y, *u, 128));
            }
        }
        PixelFormat::Jpeg => unreachable!("raw_len is None for JPEG"),
    }

    Ok(rgb)
}

/// Pack RGB8 into a raw sensor layout
pub fn from_rgb8(format: PixelFormat, rgb: &[u8]) -> Result<Vec<u8>> {
    let out = match format {
        PixelFormat::Rgb888 => rgb.to_vec(),
        PixelFormat::Grayscale => rgb
            .chunks_exact(3)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        PixelFormat::Rgb565 => rgb
            .chunks_exact(3)
            .flat_map(|px| {
                let v = ((px[0] as u16 >> 3) << 11) | ((px[1] as u16 >> 2) << 5) | (px[2] as u16 >> 3);
                v.to_be_bytes()
            })
            .collect(),
        PixelFormat::Yuv422 => {
            let mut out = Vec::with_capacity(rgb.len() / 3 * 2);
            let mut pairs = rgb.chunks_exact(6);
            for px in &mut pairs {
                let (y0, u0, v0) = rgb_to_yuv(px[0], px[1], px[2]);
                let (y1, u1, v1) = rgb_to_yuv(px[3], px[4], px[5]);
                let u = ((u0 as u16 + u1 as u16) / 2) as u8;
                let v = ((v0 as u16 + v1 as u16) / 2) as u8;
                out.extend_from_slice(&[y0, u, y1, v]);
            }
            if let [r, g, b] = pairs.remainder() {
                let (y, u, _) = rgb_to_yuv(*r, *g, *b);
                out.extend_from_slice(&[y, u]);
            }
            out
        }
        PixelFormat::Jpeg => {
            return Err(DomainError::UnsupportedPixelFormat(format.to_string()));
        }
    };

    Ok(out)
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

fn clamp(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

// Full-range BT.601, as used by JFIF
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    [
        clamp(y + (1402 * v) / 1000),
        clamp(y - (344 * u + 714 * v) / 1000),
        clamp(y + (1772 * u) / 1000),
    ]
}

fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let y = (299 * r + 587 * g + 114 * b) / 1000;
    let u = 128 + (-169 * r - 331 * g + 500 * b) / 1000;
    let v = 128 + (500 * r - 419 * g - 81 * b) / 1000;
    (clamp(y), clamp(u), clamp(v))
}
