//! Server module for exposing the listing service over HTTP
//!
//! - `ServerBuilder` wires a store into the service and adds the tracing
//!   and CORS layers
//! - `router` declares the routes
//! - `handlers` maps requests onto `PropertyService` calls

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
