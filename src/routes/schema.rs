//! Capability queries over the static entity descriptors.

use rocket::serde::json::Json;

use crate::error::ApiError;
use crate::models::DataResponse;
use crate::schema::{self, EntityDescriptor, EntityKind};

/// Every entity with its fields, in import order.
#[get("/schema/entities")]
pub fn list_entities() -> Json<DataResponse<&'static [&'static EntityDescriptor]>> {
    Json(DataResponse {
        data: schema::entities(),
    })
}

/// One entity descriptor, looked up by name (`FoodGroup`, `food_group`, ...).
#[get("/schema/entities/<name>")]
pub fn get_entity(
    name: &str,
) -> Result<Json<DataResponse<&'static EntityDescriptor>>, ApiError> {
    let kind = EntityKind::from_name(name)
        .ok_or_else(|| ApiError::NotFound(format!("Entity '{}' not found", name)))?;

    Ok(Json(DataResponse {
        data: kind.descriptor(),
    }))
}
