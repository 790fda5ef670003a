//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Lifecycle rules live in the domain services, except the ones the
//!   database enforces atomically (the one-open-reception index and the
//!   locked resolve-then-mutate transactions).
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel failures are classified once and then
//!   mapped onto each port's error enum.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselReceptionRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pvz")).await?;
//! let receptions = DieselReceptionRepository::new(pool);
//! # let _ = receptions;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_pickup_point_repository;
mod diesel_product_repository;
mod diesel_reception_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pickup_point_repository::DieselPickupPointRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_reception_repository::DieselReceptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
