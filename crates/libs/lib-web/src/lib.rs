//! # Web Library
//!
//! HTTP handlers, middleware, services, and server wiring for the account API.
//!
//! ## Endpoints
//!
//! ```text
//! GET  /                     {"ping": "pong"}
//! GET  /health               OK
//! POST /api/v1/auth/signup   201 {"token": ...}
//! POST /api/v1/auth/login    200 {"token": ...}
//! ```
//!
//! ```bash
//! curl -X POST http://127.0.0.1:8000/api/v1/auth/signup \
//!   -H 'content-type: application/json' \
//!   -d '{"username":"ann","email":"ann@x.com","password":"p@ss1"}'
//! ```

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
pub use services::AuthService;
