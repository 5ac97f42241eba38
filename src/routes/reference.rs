use rocket::State;
use rocket::serde::json::Json;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{DataResponse, DerivationCode, NutrientDefinition, SourceCode};

#[get("/nutrients")]
pub async fn list_nutrients(
    pool: &State<PgPool>,
) -> Result<Json<DataResponse<Vec<NutrientDefinition>>>, ApiError> {
    let nutrients = sqlx::query_as::<_, NutrientDefinition>(
        r#"
        SELECT nutrient_number, units, tagname, nutrient_description,
               num_decimal_places, sort_order
        FROM usda_nutrition_nutrientdefinition
        ORDER BY sort_order, nutrient_number
        "#,
    )
    .fetch_all(pool.inner())
    .await?;

    Ok(Json(DataResponse { data: nutrients }))
}

#[get("/source-codes")]
pub async fn list_source_codes(
    pool: &State<PgPool>,
) -> Result<Json<DataResponse<Vec<SourceCode>>>, ApiError> {
    let codes = sqlx::query_as::<_, SourceCode>(
        "SELECT source_code, description FROM usda_nutrition_sourcecode ORDER BY source_code",
    )
    .fetch_all(pool.inner())
    .await?;

    Ok(Json(DataResponse { data: codes }))
}

#[get("/derivation-codes")]
pub async fn list_derivation_codes(
    pool: &State<PgPool>,
) -> Result<Json<DataResponse<Vec<DerivationCode>>>, ApiError> {
    let codes = sqlx::query_as::<_, DerivationCode>(
        "SELECT code, description FROM usda_nutrition_derivationcode ORDER BY code",
    )
    .fetch_all(pool.inner())
    .await?;

    Ok(Json(DataResponse { data: codes }))
}
