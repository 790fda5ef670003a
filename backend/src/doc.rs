//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! domain schema wrappers and the bearer token security scheme. The document
//! backs Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use crate::inbound::http::accounts::{DummyLoginBody, LoginBody, RegisterBody};
use crate::inbound::http::dto::{
    ProductResponse, PvzListingResponse, PvzResponse, ReceptionListingResponse, ReceptionResponse,
    TokenResponse,
};
use crate::inbound::http::products::AddProductBody;
use crate::inbound::http::pvz::CreatePvzBody;
use crate::inbound::http::receptions::CreateReceptionBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token from POST /login, /register or /dummyLogin.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PVZ service API",
        description = "Pickup points, receptions and products."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::dummy_login,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::pvz::create_pvz,
        crate::inbound::http::pvz::list_pvz,
        crate::inbound::http::pvz::close_last_reception,
        crate::inbound::http::pvz::delete_last_product,
        crate::inbound::http::receptions::create_reception,
        crate::inbound::http::products::add_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TokenResponse,
        PvzResponse,
        ReceptionResponse,
        ProductResponse,
        ReceptionListingResponse,
        PvzListingResponse,
        DummyLoginBody,
        RegisterBody,
        LoginBody,
        CreatePvzBody,
        CreateReceptionBody,
        AddProductBody,
    )),
    tags(
        (name = "accounts", description = "Registration and token issue"),
        (name = "pvz", description = "Pickup points and their open reception"),
        (name = "receptions", description = "Product-intake sessions"),
        (name = "products", description = "Products inside the open reception"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
