//! Persistence layer: PostgreSQL review store.
//!
//! The schema (schools, profiles, reviews, review sections, votes,
//! reports) is owned by the managed backend; this layer only issues
//! parameterized queries through `sqlx::PgPool`.

pub mod models;
pub mod postgres;

pub use postgres::PostgresStore;
