//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::Role;
use crate::domain::ports::{
    MockAccountCommand, MockPickupPointCommand, MockPickupPointQuery, MockProductCommand,
    MockReceptionCommand, MockTokenAuthorizer,
};

use super::state::{HttpState, HttpStatePorts};

/// Mocked driving ports; set expectations, then call [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub authorizer: MockTokenAuthorizer,
    pub pickup_points: MockPickupPointCommand,
    pub pickup_points_query: MockPickupPointQuery,
    pub receptions: MockReceptionCommand,
    pub products: MockProductCommand,
}

impl MockPorts {
    /// Ports whose authorizer accepts any token as `role`.
    pub fn authorizing_as(role: Role) -> Self {
        let mut ports = Self::default();
        ports.authorizer.expect_authorize().returning(move |_| Ok(role));
        ports
    }

    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            authorizer: Arc::new(self.authorizer),
            pickup_points: Arc::new(self.pickup_points),
            pickup_points_query: Arc::new(self.pickup_points_query),
            receptions: Arc::new(self.receptions),
            products: Arc::new(self.products),
        }))
    }
}
