use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_headers::trace_headers, trace_response_body::trace_response_body,
    },
    openapi,
    route,
    state::ApiState,
    store::{books::BookStore, Database, DatabaseConfig},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    database: DatabaseConfig,
}

impl ServerConfig {
    pub async fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn set_socket_address(&mut self, socket_address: SocketAddr) {
        self.socket_address = socket_address;
    }

    pub fn set_database_url(&mut self, url: String) {
        self.database.url = url;
    }
}

/// Builds the router serving the book endpoints and their documentation.
pub fn app(state: ApiState) -> Router {
    Router::new()
        .nest("/books", route::books::app::app())
        .merge(openapi::docs())
        .fallback(not_found::<ApiState>)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            method_not_allowed::<ApiState>,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body::<ApiState>,
        ))
        .layer(middleware::from_fn(trace_headers))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(config = ?self.config, "Running with");

        let pool = Database::connect(&self.config.database)
            .await
            .context("Database setup failed")?;

        let state = ApiState::new(self.config.error_verbosity, BookStore::new(pool));

        let app = app(state);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Failed to listen for CTRL+C");

            return std::future::pending::<()>().await;
        }

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");

                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
