//! Method handlers and the binding that owns them.

mod binding;
mod registry;

pub use binding::{HandlerBinding, HandlerBindingBuilder};
pub use registry::{MethodHandler, MethodRegistry, RawHandler, TypedHandler};
