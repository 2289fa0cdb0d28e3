//! plugctl: command line front end for Plug-RPC.
//!
//! - `handle` answers one CGI request from `QUERY_STRING` (or `--query`)
//! - `serve` runs the HTTP adapter
//! - `sign` prints a signed query string for a call

pub mod cli;
pub mod demo;
pub mod oneshot;
