//! Methods served by `plugctl`.

use plug_rpc::{BindingConfig, BindingError, HandlerBinding, HandlerError};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SumArgs {
    pub a: i64,
    pub b: i64,
}

/// Binding with the demo methods, flags and secret taken from config
pub fn binding(config: &BindingConfig) -> Result<HandlerBinding, BindingError> {
    plug_rpc::HandlerBindingBuilder::from_config(config)
        .method("echo", |data| Ok(Value::Object(data)))
        .method("ping", |_| Ok(json!("pong")))
        .typed_method("sum", |args: SumArgs| {
            args.a
                .checked_add(args.b)
                .ok_or_else(|| HandlerError::with_code(400, "Sum overflows"))
        })
        .build()
}
