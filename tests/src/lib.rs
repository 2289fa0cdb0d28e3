//! # Plug-RPC Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # End-to-end through PlugService
//! │   ├── scenarios.rs  # Signed calls, rejections, JSONP
//! │   └── http.rs       # axum adapter, shared binding
//! │
//! └── properties.rs     # proptest invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p plug-tests
//! cargo test -p plug-tests integration::
//! cargo test -p plug-tests properties::
//! ```

pub mod properties;
