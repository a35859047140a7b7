use std::sync::Arc;

use warp::http::StatusCode;
use warp::Filter;

use super::prometheus_reporter::{ACTIVE_SESSIONS, FRAME_BUFFERS_OUTSTANDING};
use super::PrometheusReporter;
use crate::application::services::StreamingService;
use crate::infrastructure::camera::SimulatedCamera;

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Whether new `/stream` clients will get frames
#[derive(serde::Serialize)]
struct ReadinessResponse {
    status: &'static str,
    active_sessions: i64,
    frame_buffers: usize,
    buffers_outstanding: usize,
}

fn readiness(camera: &SimulatedCamera, streaming: &StreamingService) -> (ReadinessResponse, StatusCode) {
    let stopping = streaming.is_shutting_down();
    let response = ReadinessResponse {
        status: if stopping { "stopping" } else { "ready" },
        active_sessions: ACTIVE_SESSIONS.get(),
        frame_buffers: camera.config().fb_count(),
        buffers_outstanding: camera.buffers_outstanding(),
    };
    let status = if stopping {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (response, status)
}

/// `/metrics`, `/health` and `/readyz` for the camera server
pub fn metrics_routes(
    camera: Arc<SimulatedCamera>,
    streaming: Arc<StreamingService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let metrics_camera = camera.clone();
    let metrics_route = warp::path("metrics").map(move || {
        FRAME_BUFFERS_OUTSTANDING.set(metrics_camera.buffers_outstanding() as i64);
        let body = PrometheusReporter::gather_metrics();
        warp::reply::with_header(body, "content-type", "text/plain; version=0.0.4; charset=utf-8")
    });

    let health_route = warp::path("health").map(|| {
        warp::reply::json(&HealthResponse {
            status: "healthy",
            service: "mjpeg-cam",
            version: env!("CARGO_PKG_VERSION"),
        })
    });

    let readiness_route = warp::path("readyz").map(move || {
        let (response, status) = readiness(&camera, &streaming);
        warp::reply::with_status(warp::reply::json(&response), status)
    });

    metrics_route.or(health_route).or(readiness_route)
}

pub async fn serve_metrics(port: u16, camera: Arc<SimulatedCamera>, streaming: Arc<StreamingService>) {
    tracing::info!("Metrics server starting on port {}", port);

    warp::serve(metrics_routes(camera, streaming))
        .run(([0, 0, 0, 0], port))
        .await;
}
