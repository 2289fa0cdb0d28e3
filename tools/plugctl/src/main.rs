//! plugctl entry point.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use plug_rpc::adapters::http;
use plug_rpc::{ConfigError, Namespace, PlugConfig, PlugService, SignedQuery};
use plug_telemetry::{init_logging, TelemetryConfig};
use plugctl::cli::{Args, Command};
use plugctl::{demo, oneshot};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let one_shot = matches!(args.command, Command::Handle { .. });

    let mut telemetry = TelemetryConfig::from_env();
    if args.verbose {
        telemetry = telemetry.with_level("debug");
    }
    if let Err(e) = init_logging(&telemetry) {
        if !one_shot {
            return Err(e).context("failed to initialize logging");
        }
        // `handle` still owes its caller a response
        init_logging(&TelemetryConfig::default()).ok();
        warn!(error = %e, "Invalid logging configuration, using defaults");
    }

    let config = load_config(&args);

    match args.command {
        Command::Handle { query } => {
            let mut stdout = io::stdout().lock();
            oneshot::respond(config, &oneshot::query(query), &mut stdout)
                .context("failed to write response")?;
            stdout.flush().context("failed to flush response")
        }
        Command::Serve { listen } => {
            let config = config.context("invalid configuration")?;
            let binding = demo::binding(&config.binding).context("invalid handler binding")?;
            let service = PlugService::new(config, binding).context("invalid configuration")?;
            info!(%listen, "Starting HTTP server");
            http::bind_and_serve(listen, service)
                .await
                .with_context(|| format!("HTTP server on {} failed", listen))
        }
        Command::Sign {
            method,
            secret,
            callback,
            params,
        } => {
            let config = config.context("invalid configuration")?;
            let secret = secret
                .or_else(|| config.binding.secret.clone())
                .context("no secret given and none configured")?;

            let mut query = SignedQuery::new(method, secret).namespace(Namespace::from_config(&config));
            for (key, value) in params {
                query = query.param(key, value);
            }
            if let Some(callback) = callback {
                query = query.callback(callback);
            }

            println!("{}", query.to_query_string());
            Ok(())
        }
    }
}

/// Config file (if any), then `PLUG_*` overrides
fn load_config(args: &Args) -> Result<PlugConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => PlugConfig::load(path)?,
        None => PlugConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}
