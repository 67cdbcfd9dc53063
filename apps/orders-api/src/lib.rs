//! # Bistro Orders API
//!
//! REST service for restaurant orders. Waiters submit dishes as free text
//! (`"Pizza 10.50, Cola 2.00"`); the service parses and prices them and
//! keeps the orders in SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orders API                                       │
//! │                                                                         │
//! │  HTTP ───► routes (axum) ───► OrderService ───► OrderStore ───► SQLite │
//! │                │                   │                                    │
//! │                ▼                   ▼                                    │
//! │            ApiError          bistro-core (parse, price, validate)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use cli::Args;
pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::{router, AppState};
pub use service::{OrderService, ServiceError};
