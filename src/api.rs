//! HTTP transport for the dialogue engine
//!
//! The messenger integration posts every classified message here and relays
//! the reply text back into the channel.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;
