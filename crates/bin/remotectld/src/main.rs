//! # remotectld: remotectl daemon
//!
//! Composition root that wires the device adapters together and serves the
//! remotectl functions.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging to stderr
//! - Construct the device connectors (adapters) and the function runner
//! - HTTP mode: build the axum router, bind and serve until SIGTERM/SIGINT
//! - Stdio mode: answer the single request read from stdin on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

mod config;

use std::io::{Read, Write};

use remotectl_adapter_http_axum::router;
use remotectl_adapter_http_axum::state::AppState;
use remotectl_adapter_kasa::KasaConnector;
use remotectl_adapter_redfish_reqwest::ReqwestConnector;
use remotectl_app::function::FunctionRunner;
use remotectl_domain::request::RequestEnvelope;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ServerMode};

/// Environment prefix the function watchdog uses to forward request headers.
const HEADER_ENV_PREFIX: &str = "Http_";

type Runner = FunctionRunner<ReqwestConnector, KasaConnector>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    let runner = FunctionRunner::new(config.function_settings(), ReqwestConnector, KasaConnector);
    match config.server.mode {
        ServerMode::Http => serve_http(&config, runner),
        ServerMode::Stdio => serve_stdio(&config, &runner),
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("remotectld: invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn serve_http(config: &Config, runner: Runner) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let state = AppState::new(runner, config.invocation.family);
        let app = router::build(state);

        let bind_addr = config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
        tracing::info!(
            %bind_addr,
            default_family = %config.invocation.family,
            "remotectld listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("remotectld stopped");
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// One request in, one response out. The runtime lives only as long as the
/// invocation.
fn serve_stdio(config: &Config, runner: &Runner) -> Result<(), Box<dyn std::error::Error>> {
    let mut body = Vec::new();
    std::io::stdin().read_to_end(&mut body)?;

    let mut envelope = RequestEnvelope::from_body(body);
    envelope.method = std::env::var("Http_Method").ok();
    envelope.headers = std::env::vars()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(HEADER_ENV_PREFIX)?;
            (name != "Method").then(|| (name.to_string(), value))
        })
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let response = runtime.block_on(runner.invoke(config.invocation.family, envelope));
    drop(runtime);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
