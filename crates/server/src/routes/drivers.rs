use axum::{extract::{Path, Query, State}, Json};
use serde::{de, Deserialize, Deserializer};
use tracing::info;

use models::{Driver, DriverFilter, DriverInput, VehicleType};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// Optional list filters, combined with AND.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact match on availability (`true/false`, `True/False`, `1/0`, `yes/no`).
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_available: Option<bool>,
    /// Exact match on vehicle type.
    #[param(value_type = Option<crate::openapi::VehicleType>)]
    pub vehicle_type: Option<VehicleType>,
    /// Case-insensitive substring of the driver name.
    pub name: Option<String>,
}

/// Same spellings the backing file accepts; a blank value means no filter.
fn lenient_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => service::drivers::row::parse_flag(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean `{raw}`"))),
    }
}

impl From<ListQuery> for DriverFilter {
    fn from(q: ListQuery) -> Self {
        DriverFilter { is_available: q.is_available, vehicle_type: q.vehicle_type, name: q.name }
    }
}

#[utoipa::path(
    post, path = "/drivers", tag = "drivers",
    request_body = crate::openapi::DriverCreate,
    responses(
        (status = 200, description = "Driver created", body = crate::openapi::DriverResponse),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn create_driver(
    State(state): State<ServerState>,
    Json(input): Json<DriverInput>,
) -> Result<Json<Driver>, JsonApiError> {
    let driver = state.drivers.create(input).await?;
    Ok(Json(driver))
}

#[utoipa::path(
    get, path = "/drivers/{id}", tag = "drivers",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Driver found", body = crate::openapi::DriverResponse),
        (status = 404, description = "Driver not found"),
    )
)]
pub async fn get_driver(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Driver>, JsonApiError> {
    let driver = state.drivers.get(id).await?;
    Ok(Json(driver))
}

#[utoipa::path(
    put, path = "/drivers/{id}", tag = "drivers",
    params(("id" = u64, Path, description = "Driver id")),
    request_body = crate::openapi::DriverCreate,
    responses(
        (status = 200, description = "Driver updated", body = crate::openapi::DriverResponse),
        (status = 404, description = "Driver not found"),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn update_driver(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(input): Json<DriverInput>,
) -> Result<Json<Driver>, JsonApiError> {
    let driver = state.drivers.update(id, input).await?;
    Ok(Json(driver))
}

#[utoipa::path(
    get, path = "/drivers", tag = "drivers",
    params(ListQuery),
    responses((status = 200, description = "Matching drivers in insertion order", body = [crate::openapi::DriverResponse]))
)]
pub async fn list_drivers(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Driver>>, JsonApiError> {
    let filter = DriverFilter::from(q);
    let drivers = state.drivers.list(&filter).await?;
    info!(count = drivers.len(), "list drivers");
    Ok(Json(drivers))
}
