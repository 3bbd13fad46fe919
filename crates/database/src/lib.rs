//! # Imóveis Database Crate
//!
//! This crate is the only place that knows about SQL. It talks to a MySQL
//! compatible server holding the single `imoveis` table.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** The HTTP layer only sees the `ImovelStore` trait. SQL text,
//!   parameter binding and row decoding stay in this crate.
//! - **One connection per call:** `ConnectionProvider` opens a fresh connection
//!   for every store operation and the operation closes it before returning.
//!   There is no pool and no retry.
//! - **Parameterized SQL only:** every value reaches the server through `?`
//!   placeholders.
//!
//! ## Public API
//!
//! - `ConnectionProvider`: builds connect options once from `DatabaseSettings`.
//! - `ImovelStore` / `DbRepository`: the data access seam and its MySQL implementation.
//! - `load_schema`: runs a schema/seed script statement by statement.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::ConnectionProvider;
pub use error::DbError;
pub use repository::{DbRepository, ImovelStore};
pub use schema::{load_schema, split_statements};
