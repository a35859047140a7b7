use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::domain::value_objects::{
    Boundary, CameraConfig, FrameSize, JpegQuality, PixelFormat, ServerConfig, StreamConfig,
    DEFAULT_BOUNDARY,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mjpeg-cam",
    version = "0.1.0",
    about = "MJPEG camera streaming server"
)]
pub struct Config {
    /// HTTP port serving the pages and the MJPEG stream
    #[arg(long, env = "HTTP_PORT", default_value = "8080")]
    pub http_port: u16,

    /// Metrics server port
    #[arg(long, env = "METRICS_PORT", default_value = "9001")]
    pub metrics_port: u16,

    /// Multipart boundary token
    #[arg(long, env = "STREAM_BOUNDARY", default_value = DEFAULT_BOUNDARY)]
    pub boundary: String,

    /// Quality used when converting raw frames to JPEG (1-100)
    #[arg(long, env = "JPEG_QUALITY", default_value = "80")]
    pub jpeg_quality: u8,

    /// Sensor frame size (qqvga, qvga, cif, vga, svga, xga, hd, uxga)
    #[arg(long, env = "FRAME_SIZE", default_value = "qvga")]
    pub frame_size: FrameSize,

    /// Sensor pixel format (jpeg, rgb565, rgb888, grayscale, yuv422)
    #[arg(long, env = "PIXEL_FORMAT", default_value = "jpeg")]
    pub pixel_format: PixelFormat,

    /// Number of frame buffers held by the camera driver
    #[arg(long, env = "FB_COUNT", default_value = "1")]
    pub fb_count: usize,

    /// How long a capture waits for a free frame buffer
    #[arg(long, env = "CAPTURE_TIMEOUT_MS", default_value = "2000")]
    pub capture_timeout_ms: u64,

    /// Sensor frame rate
    #[arg(long, env = "SENSOR_FPS", default_value = "25")]
    pub sensor_fps: u32,

    /// JPEG quality of frames encoded by the sensor itself
    #[arg(long, env = "SENSOR_QUALITY", default_value = "85")]
    pub sensor_quality: u8,

    /// Directory of JPEG files replayed in a loop instead of the test pattern
    #[arg(long, env = "REPLAY_DIR")]
    pub replay_dir: Option<PathBuf>,

    /// GPIO pin driving the flash LED
    #[arg(long, env = "LED_PIN", default_value = "4")]
    pub led_pin: u8,

    /// Do not serve the pose demo page at /tm
    #[arg(long, env = "DISABLE_TM_PAGE")]
    pub disable_tm_page: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Minimum allowed port (ports below 1024 are privileged)
const MIN_USER_PORT: u16 = 1024;

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        Self::validate_port(self.http_port, "HTTP")?;
        Self::validate_port(self.metrics_port, "metrics")?;

        if self.http_port == self.metrics_port {
            anyhow::bail!("HTTP port and metrics port cannot be the same");
        }

        if let Some(dir) = &self.replay_dir {
            if !dir.is_dir() {
                anyhow::bail!("Replay directory not found: {:?}", dir);
            }
        }

        self.to_stream_config()?;
        self.to_camera_config()?;

        Ok(())
    }

    fn validate_port(port: u16, name: &str) -> anyhow::Result<()> {
        if port == 0 {
            anyhow::bail!("Invalid {} port: port cannot be 0", name);
        }
        if port < MIN_USER_PORT {
            anyhow::bail!(
                "Invalid {} port: {} is a privileged port (< {}). Use a port >= {}",
                name,
                port,
                MIN_USER_PORT,
                MIN_USER_PORT
            );
        }
        Ok(())
    }

    pub fn to_stream_config(&self) -> anyhow::Result<StreamConfig> {
        let boundary = Boundary::new(self.boundary.clone())?;
        let quality = JpegQuality::new(self.jpeg_quality)?;
        Ok(StreamConfig::new(boundary, quality))
    }

    /// Replayed files are already JPEG, so replay forces the JPEG pixel format
    pub fn to_camera_config(&self) -> anyhow::Result<CameraConfig> {
        let pixel_format = if self.replay_dir.is_some() {
            PixelFormat::Jpeg
        } else {
            self.pixel_format
        };

        let config = CameraConfig::new(self.frame_size, pixel_format, self.fb_count)?
            .with_capture_timeout(Duration::from_millis(self.capture_timeout_ms))
            .with_sensor_fps(self.sensor_fps)?
            .with_sensor_quality(JpegQuality::new(self.sensor_quality)?);
        Ok(config)
    }

    pub fn to_server_config(&self) -> anyhow::Result<ServerConfig> {
        Ok(ServerConfig::new(self.http_port)?.with_tm_page(!self.disable_tm_page))
    }
}
