use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info};

use mjpeg_cam::{
    load_replay_frames, serve_camera, serve_metrics, AppContext, Config, ImageJpegEncoder,
    LedService, LogLed, PrometheusReporter, SimulatedCamera, StreamingService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize logging
    let filter = if config.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    info!("Starting mjpeg-cam v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Validate CLI configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    // Initialize metrics
    PrometheusReporter::init_metrics()?;

    // Convert CLI config to domain configs
    let stream_config = config.to_stream_config()?;
    let camera_config = config.to_camera_config()?;
    let server_config = config.to_server_config()?;

    // Create infrastructure implementations (dependency injection)
    let encoder = Arc::new(ImageJpegEncoder);
    let camera = match &config.replay_dir {
        Some(dir) => {
            let frames = load_replay_frames(dir).map_err(|e| anyhow::anyhow!("{}", e))?;
            info!("Replaying {} frames from {:?}", frames.len(), dir);
            SimulatedCamera::new(camera_config, frames)
        }
        None => SimulatedCamera::test_pattern(camera_config, encoder.as_ref()),
    }
    .map_err(|e| anyhow::anyhow!("Camera init failed: {}", e))?;
    let camera = Arc::new(camera);

    let metrics_reporter = Arc::new(PrometheusReporter::new());
    let led = LedService::new(Arc::new(LogLed::new(config.led_pin)));

    // Create application services
    let streaming = Arc::new(StreamingService::new(
        camera.clone(),
        encoder,
        stream_config,
        metrics_reporter,
    ));

    // Start metrics server
    let metrics_port = config.metrics_port;
    let metrics_camera = camera.clone();
    let metrics_streaming = streaming.clone();
    tokio::spawn(async move {
        serve_metrics(metrics_port, metrics_camera, metrics_streaming).await;
    });

    let ctx = Arc::new(AppContext {
        streaming,
        led,
        server: server_config,
    });

    // Set up graceful shutdown; open streams are ended by serve_camera
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received (Ctrl+C)"),
            Err(err) => error!("Failed to listen for shutdown signal: {}", err),
        }
        let _ = shutdown_tx.send(());
    });

    let (addr, server) = serve_camera(ctx, async {
        shutdown_rx.await.ok();
    })
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("-------------------------------------------------------");
    info!("Camera Server Ready");
    info!("   Stream:  http://{}/stream", addr);
    info!("   Page:    http://{}/", addr);
    info!("   Metrics: http://0.0.0.0:{}/metrics", config.metrics_port);
    info!("   Health:  http://0.0.0.0:{}/health", config.metrics_port);
    info!("-------------------------------------------------------");

    server.await;

    info!("Server stopped gracefully");
    Ok(())
}
