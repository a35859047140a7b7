use bytes::Bytes;

use super::StoredFrame;
use crate::domain::entities::Frame;
use crate::domain::errors::Result;
use crate::domain::ports::FrameEncoder;
use crate::domain::value_objects::{CameraConfig, PixelFormat};
use crate::infrastructure::codec::pixel;

const PATTERN_FRAMES: usize = 8;

/// Render a short loop of test pattern frames in the sensor's output format.
///
/// With JPEG output the frames are encoded at the sensor quality, the way
/// the sensor's own encoder would hand them out.
pub fn render_test_pattern(
    config: &CameraConfig,
    encoder: &dyn FrameEncoder,
) -> Result<Vec<StoredFrame>> {
    let (width, height) = config.frame_size().dimensions();

    (0..PATTERN_FRAMES)
        .map(|index| {
            let rgb = pattern_rgb(width, height, index);
            let data = match config.pixel_format() {
                PixelFormat::Jpeg => {
                    let raw = Frame::new(Bytes::from(rgb), PixelFormat::Rgb888, width, height, 0);
                    encoder.encode_jpeg(&raw, config.sensor_quality())?
                }
                format => Bytes::from(pixel::from_rgb8(format, &rgb)?),
            };
            Ok(StoredFrame {
                data,
                width,
                height,
            })
        })
        .collect()
}

/// Gradient background with a bright bar sweeping left to right
fn pattern_rgb(width: u32, height: u32, index: usize) -> Vec<u8> {
    let bar_width = (width / 10).max(1);
    let bar_x = (width as usize * index / PATTERN_FRAMES) as u32;

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            if x >= bar_x && x < bar_x + bar_width {
                rgb.extend_from_slice(&[255, 255, 255]);
            } else {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                rgb.extend_from_slice(&[r, g, 128]);
            }
        }
    }
    rgb
}
