//! Process entrypoint: loads config, starts the kernel thread, and serves
//! the REST and streaming surfaces until a shutdown signal arrives.

use std::path::PathBuf;

use clap::Parser;

use swarmfire_app::state::{AppState, WorldBounds};
use swarmfire_app::{config_loader, routes, tick_loop, ws};
use swarmfire_core::commands::ExternalCommand;

#[derive(Debug, Parser)]
#[command(name = "swarmfire", about = "Wildfire containment swarm simulator")]
struct Cli {
    /// Path to the TOML config file. Built-in defaults are used if absent.
    #[arg(long, default_value = "swarmfire.toml")]
    config: PathBuf,
    /// REST surface bind port, overrides `sim.rest_port` in config.
    #[arg(long)]
    rest_port: Option<u16>,
    /// Streaming surface bind port, overrides `sim.ws_port` in config.
    #[arg(long)]
    ws_port: Option<u16>,
    /// Master RNG seed, overrides `sim.seed` in config.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match config_loader::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    if let Some(rest_port) = cli.rest_port {
        config.server.rest_port = rest_port;
    }
    if let Some(ws_port) = cli.ws_port {
        config.server.ws_port = ws_port;
    }
    if let Some(seed) = cli.seed {
        config.sim.seed = seed;
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let world_bounds = WorldBounds {
        width_m: config.fire.grid_width as f64 * config.fire.cell_size_m,
        height_m: config.fire.grid_height as f64 * config.fire.cell_size_m,
    };

    let (command_tx, snapshot_rx) = match tick_loop::spawn(config.clone()) {
        Ok(handles) => handles,
        Err(err) => {
            tracing::error!(%err, "failed to start kernel thread");
            std::process::exit(2);
        }
    };
    let state = AppState::new(command_tx.clone(), snapshot_rx, world_bounds);

    let rest_router = routes::router(state.clone());
    let ws_router = ws::router(state);

    let rest_addr = format!("0.0.0.0:{}", config.server.rest_port);
    let ws_addr = format!("0.0.0.0:{}", config.server.ws_port);

    let rest_listener = match tokio::net::TcpListener::bind(&rest_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, addr = %rest_addr, "failed to bind REST surface");
            std::process::exit(1);
        }
    };
    let ws_listener = match tokio::net::TcpListener::bind(&ws_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, addr = %ws_addr, "failed to bind streaming surface");
            std::process::exit(1);
        }
    };

    tracing::info!(rest_addr = %rest_addr, ws_addr = %ws_addr, "swarmfire serving");

    let rest_server = axum::serve(rest_listener, rest_router.layer(
        tower_http::trace::TraceLayer::new_for_http(),
    ).layer(tower_http::cors::CorsLayer::permissive()));
    let ws_server = axum::serve(ws_listener, ws_router);

    tokio::select! {
        result = rest_server => {
            if let Err(err) = result {
                tracing::error!(%err, "REST server exited with an error");
            }
        }
        result = ws_server => {
            if let Err(err) = result {
                tracing::error!(%err, "streaming server exited with an error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    let _ = command_tx.send(ExternalCommand::Shutdown);
    tracing::info!("swarmfire exiting");
}
