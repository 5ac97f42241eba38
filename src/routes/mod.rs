//! HTTP route handlers grouped by resource.
//!
//! Every handler is a read-only `GET`. The importer is the only writer.

use rocket::Route;

pub mod foods;
pub mod health;
pub mod params;
pub mod reference;
pub mod schema;

/// Every browse handler, ready to mount under `/api/v1`.
pub fn api_routes() -> Vec<Route> {
    routes![
        // Health
        health::health_check,
        // Schema metadata
        schema::list_entities,
        schema::get_entity,
        // Foods
        foods::list_food_groups,
        foods::list_foods,
        foods::get_food,
        // Code tables
        reference::list_nutrients,
        reference::list_source_codes,
        reference::list_derivation_codes,
    ]
}
