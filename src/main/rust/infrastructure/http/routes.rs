use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::Deserialize;
use warp::http::Response;
use warp::hyper::Body;
use warp::{Filter, Rejection, Reply};

use super::HyperChunkSink;
use crate::application::services::{LedService, StreamingService};
use crate::domain::errors::{DomainError, Result};
use crate::domain::value_objects::{LedCommand, ServerConfig};

const INDEX_HTML: &str = include_str!("../../../resources/index.html");
const TM_HTML: &str = include_str!("../../../resources/tm.html");

/// State shared by every request handler
pub struct AppContext {
    pub streaming: Arc<StreamingService>,
    pub led: LedService,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
struct LedQuery {
    state: Option<String>,
}

fn with_context(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = (Arc<AppContext>,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

/// Camera endpoints: `/`, `/tm`, `/stream` and `/led`
pub fn routes(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index_route = warp::get()
        .and(warp::path::end())
        .map(|| warp::reply::html(INDEX_HTML));

    let tm_route = warp::get()
        .and(warp::path("tm"))
        .and(warp::path::end())
        .and(with_context(ctx.clone()))
        .and_then(tm_handler);

    let stream_route = warp::get()
        .and(warp::path("stream"))
        .and(warp::path::end())
        .and(with_context(ctx.clone()))
        .and_then(stream_handler);

    let led_route = warp::get()
        .and(warp::path("led"))
        .and(warp::path::end())
        .and(warp::query::<LedQuery>())
        .and(with_context(ctx))
        .map(led_handler);

    index_route.or(tm_route).or(stream_route).or(led_route)
}

async fn tm_handler(ctx: Arc<AppContext>) -> std::result::Result<impl Reply, Rejection> {
    if !ctx.server.tm_page_enabled() {
        return Err(warp::reject::not_found());
    }
    Ok(warp::reply::html(TM_HTML))
}

async fn stream_handler(ctx: Arc<AppContext>) -> std::result::Result<impl Reply, Infallible> {
    let (sender, body) = Body::channel();
    let streaming = ctx.streaming.clone();
    let content_type = streaming.content_type();

    tokio::spawn(async move {
        let mut sink = HyperChunkSink::new(sender);
        streaming.run_session(&mut sink).await;
    });

    let reply = warp::reply::with_header(Response::new(body), "content-type", content_type);
    Ok(warp::reply::with_header(reply, "cache-control", "no-cache"))
}

fn led_handler(query: LedQuery, ctx: Arc<AppContext>) -> impl Reply {
    match query.state.as_deref().map(str::parse::<LedCommand>) {
        Some(Ok(command)) => ctx.led.apply(command),
        Some(Err(e)) => tracing::debug!("Ignoring LED request: {}", e),
        None => {}
    }
    warp::reply()
}

/// Bind the camera endpoints and return the server future.
///
/// Once `shutdown` resolves, running streams are ended so their responses
/// complete and the server future can finish.
pub fn serve_camera(
    ctx: Arc<AppContext>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>)> {
    let port = ctx.server.port();
    let streaming = ctx.streaming.clone();
    let stop_sessions = async move {
        shutdown.await;
        streaming.shutdown();
    };

    warp::serve(routes(ctx))
        .try_bind_with_graceful_shutdown(([0, 0, 0, 0], port), stop_sessions)
        .map_err(|e| DomainError::ServerInitFailed(e.to_string()))
}
