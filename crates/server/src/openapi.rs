//! OpenAPI document served at `/api-docs/openapi.json` and rendered at `/docs`.
//!
//! The schema types mirror the wire shapes of `models`; a test below keeps
//! them in step.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
    pub description: String,
    pub docs_url: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sedan,
    Suv,
    Hatchback,
    Wagon,
    Standard,
}

#[derive(Serialize, ToSchema)]
pub struct DriverCreate {
    pub name: String,
    pub license_number: String,
    pub vehicle_type: Option<VehicleType>,
    /// Defaults to `true` when omitted.
    #[schema(default = true)]
    pub is_available: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct DriverResponse {
    pub id: u64,
    pub name: String,
    pub license_number: String,
    pub vehicle_type: Option<VehicleType>,
    pub is_available: bool,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Taxi Driver Management System", description = "CRUD API for managing taxi drivers"),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::drivers::create_driver,
        crate::routes::drivers::get_driver,
        crate::routes::drivers::update_driver,
        crate::routes::drivers::list_drivers,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeMessage,
            VehicleType,
            DriverCreate,
            DriverResponse,
        )
    ),
    tags(
        (name = "meta"),
        (name = "drivers")
    )
)]
pub struct ApiDoc;
