//! The HTTP front end: binds a single handler at `/`, feeds the request
//! body and headers into a fresh engine, and runs the path as a pipeline.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use tracing::{error, info};
use warp::http::{HeaderMap, Method, StatusCode};
use warp::{Filter, Rejection, Reply};

use crate::engine::Engine;
use crate::help;

const HEADER_PREFIX: &str = "hashsrv-";

fn bind_variables(engine: &mut Engine, headers: &HeaderMap, body: &[u8]) {
    engine.set_variable("body", body.to_vec());
    for (name, value) in headers.iter() {
        let lower = name.as_str().to_lowercase();
        if let Some(suffix) = lower.strip_prefix(HEADER_PREFIX) {
            engine.set_variable(suffix, value.as_bytes().to_vec());
        }
    }
}

async fn handle_request(
    method: Method,
    path: warp::path::Tail,
    headers: HeaderMap,
    query: HashMap<String, String>,
    body: Bytes,
    verbose: bool,
) -> Result<impl Reply, Infallible> {
    let path = path.as_str();
    let tokens: Vec<String> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').map(str::to_owned).collect()
    };

    if method == Method::GET && tokens.is_empty() {
        let mut engine = Engine::new();
        bind_variables(&mut engine, &headers, &body);
        let page = help::render(&engine);
        return Ok(warp::reply::with_status(
            warp::reply::html(page),
            StatusCode::OK,
        )
        .into_response());
    }

    let mut engine = Engine::new();
    engine.debug_mode = verbose || query.get("debug").is_some_and(|v| !v.is_empty());
    bind_variables(&mut engine, &headers, &body);

    if matches!(method, Method::POST | Method::PUT) {
        engine.push_stack(body.to_vec());
    }

    info!(path, method = %method, "running pipeline");

    match engine.run(&tokens) {
        Ok(out) => {
            let content_type = if engine.debug_mode {
                "text/html"
            } else {
                "application/octet-stream"
            };
            Ok(warp::reply::with_header(
                warp::reply::with_status(out, StatusCode::OK),
                "content-type",
                content_type,
            )
            .into_response())
        }
        Err(err) => {
            error!(error = %err, "pipeline failed");
            Ok(warp::reply::with_status(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
                .into_response())
        }
    }
}

fn routes(verbose: bool) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::method()
        .and(warp::path::tail())
        .and(warp::header::headers_cloned())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::body::bytes())
        .and(warp::any().map(move || verbose))
        .and_then(handle_request)
}

pub async fn serve(addr: SocketAddr, verbose: bool) {
    info!(%addr, verbose, "hashsrv listening");
    warp::serve(routes(verbose)).run(addr).await;
}
