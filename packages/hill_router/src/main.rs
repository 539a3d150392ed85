use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::serve;
use axum::{Json, Router};
use hill_router::common::config::{RouteConfig, UserRouteConfig};
use hill_router::common::error::Error;
use hill_router::common::graph_data::RouteGraph;
use hill_router::loading::file::load_graph_file;
use hill_router::loading::petgraph::{create_graph, nearest_node};
use hill_router::routing::find_route;
use serde_json::json;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    graph: Arc<RouteGraph>,
}

/// Map each error onto the status code the frontend expects
fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::InvalidConstraint { .. }
        | Error::InvalidRouteMode { .. }
        | Error::EmptyPath => StatusCode::BAD_REQUEST,
        Error::NoPath { .. }
        | Error::NodeNotFound { .. }
        | Error::EmptyGraph => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &Error) -> Response {
    tracing::warn!(error = %err, "route request failed");

    let json_response = json!({
        "status": "error",
        "message": err.to_string()
    });

    (error_status(err), Json(json_response)).into_response()
}

async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<UserRouteConfig>,
) -> Response {
    let now = Instant::now();

    let route_config: RouteConfig = match query.try_into() {
        Ok(config) => config,
        Err(err) => return error_response(&err),
    };

    let result = nearest_node(&state.graph, route_config.start)
        .and_then(|source| {
            let target = nearest_node(&state.graph, route_config.end)?;
            find_route(&state.graph, source, target, &route_config)
        });

    match result {
        Ok(route) => {
            tracing::info!(
                dist = route.metrics.dist,
                gain = route.metrics.gain,
                elapsed = ?now.elapsed(),
                "route generated"
            );
            (StatusCode::OK, Json(route)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn health_check() -> impl IntoResponse {
    let msg = "Hello World!";

    let json_response = json!({
        "status": "success",
        "message": msg
    });

    Json(json_response)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let graph_path = env::var("CITY_GRAPH_PATH")
        .unwrap_or_else(|_| "city_graph.json".to_string());

    let graph_file = load_graph_file(Path::new(&graph_path))
        .expect("Error reading the city graph file!");
    let graph = create_graph(graph_file.nodes, graph_file.edges);

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "city graph loaded"
    );

    let state = AppState {
        graph: Arc::new(graph),
    };

    let router = Router::new()
        .route("/healthcheck", get(health_check))
        .route("/route", get(get_route))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000")
        .await
        .expect("Error binding to localhost:8000!");
    serve(listener, router).await.expect("Error serving API!");
}
