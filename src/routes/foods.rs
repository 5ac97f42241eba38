//! Food group and food description endpoints.

use rocket::State;
use rocket::serde::json::Json;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{
    DataResponse, FoodDescription, FoodDetail, FoodGroupWithCount, FoodSummary, Footnote,
    PageMetadata, PaginatedResponse, Weight,
};
use crate::routes::params::FoodListParams;

/// All food groups ordered by code, with the number of foods in each.
#[get("/food-groups")]
pub async fn list_food_groups(
    pool: &State<PgPool>,
) -> Result<Json<DataResponse<Vec<FoodGroupWithCount>>>, ApiError> {
    let groups = sqlx::query_as::<_, FoodGroupWithCount>(
        r#"
        SELECT g.code, g.description, COUNT(f.ndb_no)::BIGINT AS food_count
        FROM usda_nutrition_foodgroup g
        LEFT JOIN usda_nutrition_fooddescription f ON f.food_group_id = g.code
        GROUP BY g.code, g.description
        ORDER BY g.code
        "#,
    )
    .fetch_all(pool.inner())
    .await?;

    Ok(Json(DataResponse { data: groups }))
}

/// Paginated food list, optionally restricted to one food group.
#[get("/foods?<params..>")]
pub async fn list_foods(
    pool: &State<PgPool>,
    params: Option<FoodListParams>,
) -> Result<Json<PaginatedResponse<FoodSummary>>, ApiError> {
    let params = params.unwrap_or_default();
    let group = params.group();
    let pagination = params.pagination();
    let offset = pagination.offset()?;

    if let Some(code) = group {
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT code FROM usda_nutrition_foodgroup WHERE code = $1")
                .bind(code)
                .fetch_optional(pool.inner())
                .await?;
        if exists.is_none() {
            return Err(ApiError::NotFound(format!("Food group '{}' not found", code)));
        }
    }

    // NULL group means no filter
    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)::BIGINT
        FROM usda_nutrition_fooddescription
        WHERE ($1::text IS NULL OR food_group_id = $1)
        "#,
    )
    .bind(group)
    .fetch_one(pool.inner())
    .await?;

    let foods = sqlx::query_as::<_, FoodSummary>(
        r#"
        SELECT ndb_no, food_group_id, short_desc
        FROM usda_nutrition_fooddescription
        WHERE ($1::text IS NULL OR food_group_id = $1)
        ORDER BY ndb_no
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group)
    .bind(pagination.size())
    .bind(offset)
    .fetch_all(pool.inner())
    .await?;

    Ok(Json(PaginatedResponse {
        data: foods,
        page: PageMetadata::new(pagination.page(), pagination.size(), total.0),
    }))
}

/// One food with its household weights and footnotes.
#[get("/foods/<ndb_no>")]
pub async fn get_food(
    ndb_no: &str,
    pool: &State<PgPool>,
) -> Result<Json<DataResponse<FoodDetail>>, ApiError> {
    let food = sqlx::query_as::<_, FoodDescription>(
        r#"
        SELECT ndb_no, food_group_id, long_desc, short_desc, com_name,
               manufacturer_name, survey, refuse_description, refuse,
               scientific_name,
               nitrogen_factor::text AS nitrogen_factor,
               protein_factor::text AS protein_factor,
               fat_factor::text AS fat_factor,
               cho_factor::text AS cho_factor
        FROM usda_nutrition_fooddescription
        WHERE ndb_no = $1
        "#,
    )
    .bind(ndb_no)
    .fetch_optional(pool.inner())
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Food '{}' not found", ndb_no)))?;

    let weights = sqlx::query_as::<_, Weight>(
        r#"
        SELECT id, food_description_id, sequence,
               amount::text AS amount,
               measure_description,
               gram_weight::text AS gram_weight,
               number_data_points,
               standard_deviation::text AS standard_deviation
        FROM usda_nutrition_weight
        WHERE food_description_id = $1
        ORDER BY sequence, id
        "#,
    )
    .bind(ndb_no)
    .fetch_all(pool.inner())
    .await?;

    let footnotes = sqlx::query_as::<_, Footnote>(
        r#"
        SELECT id, food_description_id, footnote_no, footnote_type,
               nutrient_definition_id, footnote_text
        FROM usda_nutrition_footnote
        WHERE food_description_id = $1
        ORDER BY footnote_no, id
        "#,
    )
    .bind(ndb_no)
    .fetch_all(pool.inner())
    .await?;

    log::debug!(
        "food {}: {} weights, {} footnotes",
        ndb_no,
        weights.len(),
        footnotes.len()
    );

    Ok(Json(DataResponse {
        data: FoodDetail {
            food,
            weights,
            footnotes,
        },
    }))
}
