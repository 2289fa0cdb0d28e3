//! Command line arguments.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// plugctl: signed query-string RPC dispatcher
#[derive(Parser, Debug)]
#[command(name = "plugctl")]
#[command(about = "Serve, handle and sign Plug-RPC requests")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer one request and exit (CGI)
    Handle {
        /// Literal query text instead of `QUERY_STRING`
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        listen: SocketAddr,
    },

    /// Print the signed query string for a call
    Sign {
        /// Method to call
        #[arg(short, long)]
        method: String,

        /// Signing secret (defaults to the configured one)
        #[arg(short, long)]
        secret: Option<String>,

        /// JSONP callback
        #[arg(long)]
        callback: Option<String>,

        /// Data parameters as KEY=VALUE
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))
}
