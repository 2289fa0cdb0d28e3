//! Codecs between transport text and the parameter model.
//!
//! - [`QueryCodec`] - query string / structured map to [`ParameterSet`]
//! - [`PhpCodec`] - PHP `serialize()` encoding of a parameter set, the
//!   byte sequence signatures are computed over
//!
//! Codecs are marker structs with associated functions, no state.
//!
//! [`ParameterSet`]: crate::domain::params::ParameterSet

mod php;
mod query;

pub use php::PhpCodec;
pub use query::QueryCodec;
