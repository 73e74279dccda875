//! # edurater-api
//!
//! REST API backend for the EduRater school review platform.
//!
//! This crate wraps a pure time-series aggregation core in thin JSON
//! endpoints. Persistence and credential verification are delegated —
//! rows live in the platform's PostgreSQL schema, and the fronting auth
//! proxy resolves session tokens into identity headers before requests
//! arrive here.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Identity extraction (auth)
//!     │
//!     ├── MetricsService / ReviewService (service/)
//!     │
//!     ├── Aggregation core (domain/)
//!     └── PostgreSQL store (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
