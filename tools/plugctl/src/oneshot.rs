//! `plugctl handle`: answer one request.

use std::io::{self, Write};

use plug_rpc::adapters::cgi;
use plug_rpc::{ConfigError, FaultExposure, PlugConfig, PlugService, RawQuery};
use tracing::debug;

use crate::demo;

/// Query to answer: `--query` text taken literally, else `QUERY_STRING`
pub fn query(literal: Option<String>) -> RawQuery {
    match literal {
        Some(text) => RawQuery::Literal(text),
        None => cgi::query_from_env(),
    }
}

/// Write exactly one response to `out`.
///
/// A configuration that failed to load still produces an envelope (500),
/// with details since no binding exists yet.
pub fn respond<W: Write>(
    config: Result<PlugConfig, ConfigError>,
    query: &RawQuery,
    out: &mut W,
) -> io::Result<()> {
    let response = match config {
        Ok(config) => {
            debug!("Handling one-shot request");
            let binding = demo::binding(&config.binding);
            PlugService::respond_once(binding, query, config)
        }
        Err(e) => PlugService::config_failure(&e, FaultExposure::from_debug_flag(None)),
    };

    cgi::write_response(out, &response)
}
