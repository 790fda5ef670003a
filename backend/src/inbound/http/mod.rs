//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
mod deadline;
pub mod dto;
pub mod error;
pub mod health;
pub mod products;
pub mod pvz;
pub mod receptions;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;

pub use crate::domain::ApiResult;
pub use error::{json_error_handler, query_error_handler};
