//! HTTP Layer - RESTful API + WebSocket
//!
//! 把 Voice Explorer 暴露给 Web 面板

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
