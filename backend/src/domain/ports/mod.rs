//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, tokens, metrics) are implemented by
//! outbound adapters. Driving ports are implemented by domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod entity_metrics;
mod password_hasher;
mod pickup_point_command;
mod pickup_point_repository;
mod product_command;
mod product_repository;
mod reception_command;
mod reception_repository;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use account_command::{MockAccountCommand, MockTokenAuthorizer};
pub use account_command::{AccountCommand, LoginRequest, RegisterRequest, TokenAuthorizer};
#[cfg(test)]
pub use entity_metrics::MockEntityMetrics;
pub use entity_metrics::{EntityKind, EntityMetrics, EntityMetricsError, NoOpEntityMetrics};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use pickup_point_command::{MockPickupPointCommand, MockPickupPointQuery};
pub use pickup_point_command::{PickupPointCommand, PickupPointQuery};
#[cfg(test)]
pub use pickup_point_repository::MockPickupPointRepository;
pub use pickup_point_repository::{PickupPointRepository, PickupPointRepositoryError};
#[cfg(test)]
pub use product_command::MockProductCommand;
pub use product_command::ProductCommand;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use reception_command::{MockReceptionCommand, MockReceptionQuery};
pub use reception_command::{ReceptionCommand, ReceptionQuery};
#[cfg(test)]
pub use reception_repository::MockReceptionRepository;
pub use reception_repository::{ReceptionRepository, ReceptionRepositoryError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenClaims, TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
