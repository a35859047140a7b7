use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use warp::http::StatusCode;

use mjpeg_cam::{
    metrics_routes, routes, serve_camera, AppContext, CameraConfig, Frame, FrameSize, FrameSource,
    ImageJpegEncoder, LedService, LogLed, MultipartReader, PixelFormat, PrometheusReporter,
    ServerConfig, SimulatedCamera, StreamConfig, StreamingService, DEFAULT_BOUNDARY,
};

/// Hands out a fixed list of frames, then reports the peripheral as gone
struct FiniteSource {
    frames: Mutex<VecDeque<Frame>>,
    released: Mutex<Vec<u64>>,
}

#[async_trait]
impl FrameSource for FiniteSource {
    async fn acquire(&self) -> Option<Frame> {
        self.frames.lock().unwrap().pop_front()
    }

    fn release(&self, frame: Frame) {
        self.released.lock().unwrap().push(frame.sequence());
    }
}

struct TestApp {
    ctx: Arc<AppContext>,
    source: Arc<FiniteSource>,
    led: Arc<LogLed>,
}

fn app(frames: Vec<Frame>, tm_page: bool) -> TestApp {
    let source = Arc::new(FiniteSource {
        frames: Mutex::new(frames.into()),
        released: Mutex::new(Vec::new()),
    });
    let streaming = Arc::new(StreamingService::new(
        source.clone(),
        Arc::new(ImageJpegEncoder),
        StreamConfig::default(),
        Arc::new(PrometheusReporter::new()),
    ));
    let led = Arc::new(LogLed::new(4));

    let ctx = Arc::new(AppContext {
        streaming,
        led: LedService::new(led.clone()),
        server: ServerConfig::new(8080).unwrap().with_tm_page(tm_page),
    });

    TestApp { ctx, source, led }
}

fn jpeg_frame(sequence: u64, fill: u8) -> Frame {
    let mut data = vec![0xFF, 0xD8];
    data.extend(std::iter::repeat(fill).take(200));
    data.extend_from_slice(&[0xFF, 0xD9]);
    Frame::new(Bytes::from(data), PixelFormat::Jpeg, 320, 240, sequence)
}

#[tokio::test]
async fn test_stream_serves_multipart_jpeg() {
    let frames = vec![jpeg_frame(0, 1), jpeg_frame(1, 2), jpeg_frame(2, 3)];
    let app = app(frames, true);

    let res = warp::test::request()
        .method("GET")
        .path("/stream")
        .reply(&routes(app.ctx.clone()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-type"],
        format!("multipart/x-mixed-replace;boundary={}", DEFAULT_BOUNDARY).as_str()
    );
    assert_eq!(res.headers()["cache-control"], "no-cache");

    let parts = MultipartReader::read_all(DEFAULT_BOUNDARY, res.body()).unwrap();
    assert_eq!(parts.len(), 3);
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(part.payload.len(), 204);
        assert_eq!(part.payload[2], i as u8 + 1);
    }

    assert_eq!(*app.source.released.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_stream_converts_raw_frames() {
    let raw = Frame::new(Bytes::from(vec![0x80; 16 * 8]), PixelFormat::Grayscale, 16, 8, 0);
    let app = app(vec![raw], true);

    let res = warp::test::request()
        .path("/stream")
        .reply(&routes(app.ctx.clone()))
        .await;

    let parts = MultipartReader::read_all(DEFAULT_BOUNDARY, res.body()).unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(&parts[0].payload[..2], &[0xFF, 0xD8]);
    assert_eq!(*app.source.released.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn test_stream_with_no_frames_closes_empty() {
    let app = app(Vec::new(), true);

    let res = warp::test::request()
        .path("/stream")
        .reply(&routes(app.ctx.clone()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn test_led_switches_on_and_off() {
    let app = app(Vec::new(), true);
    let filter = routes(app.ctx.clone());

    let res = warp::test::request().path("/led?state=on").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.body().is_empty());
    assert!(app.led.level());
    assert!(app.ctx.led.is_on());

    let res = warp::test::request().path("/led?state=off").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!app.led.level());
    assert!(!app.ctx.led.is_on());
}

#[tokio::test]
async fn test_led_ignores_unknown_state() {
    let app = app(Vec::new(), true);
    let filter = routes(app.ctx.clone());

    warp::test::request().path("/led?state=on").reply(&filter).await;

    for path in ["/led?state=blink", "/led", "/led?state=ON"] {
        let res = warp::test::request().path(path).reply(&filter).await;
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        assert!(res.body().is_empty());
    }
    assert!(app.ctx.led.is_on());
}

#[tokio::test]
async fn test_pages() {
    let app = app(Vec::new(), true);
    let filter = routes(app.ctx.clone());

    let res = warp::test::request().path("/").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(std::str::from_utf8(res.body()).unwrap().contains("/stream"));

    let res = warp::test::request().path("/tm").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn test_tm_page_can_be_disabled() {
    let app = app(Vec::new(), false);

    let res = warp::test::request()
        .path("/tm")
        .reply(&routes(app.ctx.clone()))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = app(Vec::new(), true);

    let res = warp::test::request()
        .path("/capture")
        .reply(&routes(app.ctx.clone()))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

fn camera_context(port: u16) -> (Arc<SimulatedCamera>, Arc<AppContext>) {
    let config = CameraConfig::new(FrameSize::Qqvga, PixelFormat::Jpeg, 1)
        .unwrap()
        .with_sensor_fps(50)
        .unwrap();
    let camera = Arc::new(SimulatedCamera::test_pattern(config, &ImageJpegEncoder).unwrap());
    let streaming = Arc::new(StreamingService::new(
        camera.clone(),
        Arc::new(ImageJpegEncoder),
        StreamConfig::default(),
        Arc::new(PrometheusReporter::new()),
    ));
    let ctx = Arc::new(AppContext {
        streaming,
        led: LedService::new(Arc::new(LogLed::new(4))),
        server: ServerConfig::new(port).unwrap(),
    });
    (camera, ctx)
}

#[tokio::test]
async fn test_health_endpoints() {
    let (camera, ctx) = camera_context(8080);
    let filter = metrics_routes(camera, ctx.streaming.clone());

    let res = warp::test::request().path("/health").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mjpeg-cam");

    let res = warp::test::request().path("/metrics").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_buffers_and_shutdown() {
    let (camera, ctx) = camera_context(8080);
    let filter = metrics_routes(camera.clone(), ctx.streaming.clone());

    let held = camera.acquire().await.unwrap();
    let res = warp::test::request().path("/readyz").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["frame_buffers"], 1);
    assert_eq!(body["buffers_outstanding"], 1);
    camera.release(held);

    ctx.streaming.shutdown();
    let res = warp::test::request().path("/readyz").reply(&filter).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["status"], "stopping");
    assert_eq!(body["buffers_outstanding"], 0);
}

#[tokio::test]
async fn test_shutdown_completes_with_open_stream() {
    let (camera, ctx) = camera_context(18187);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (addr, server) = serve_camera(ctx, async {
        shutdown_rx.await.ok();
    })
    .unwrap();
    let server = tokio::spawn(server);

    let mut client = TcpStream::connect(("127.0.0.1", addr.port())).await.unwrap();
    client
        .write_all(b"GET /stream HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut received = Vec::new();
    let mut buf = [0u8; 4096];
    while !received.windows(2).any(|w| w == [0xFF, 0xD8]) {
        let n = client.read(&mut buf).await.unwrap();
        assert!(n > 0, "stream closed before the first frame");
        received.extend_from_slice(&buf[..n]);
    }

    // Keep draining so the session is not stuck on a full socket
    let reader = tokio::spawn(async move {
        let mut buf = [0u8; 4096];
        while let Ok(n) = client.read(&mut buf).await {
            if n == 0 {
                break;
            }
        }
    });

    shutdown_tx.send(()).unwrap();
    let stopped = tokio::time::timeout(Duration::from_secs(3), server).await;

    assert!(stopped.is_ok(), "server did not stop with a stream open");
    tokio::time::timeout(Duration::from_secs(3), reader)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(camera.buffers_outstanding(), 0);
}
