use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ===== Reference Tables =====
//
// NUMERIC columns are selected as text so their exact scale survives JSON.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodGroup {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodGroupWithCount {
    pub code: String,
    pub description: String,
    pub food_count: i64,
}

/// Columns shown in the food list view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodSummary {
    pub ndb_no: String,
    pub food_group_id: String,
    pub short_desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodDescription {
    pub ndb_no: String,
    pub food_group_id: String,
    pub long_desc: String,
    pub short_desc: String,
    pub com_name: Option<String>,
    pub manufacturer_name: Option<String>,
    pub survey: Option<bool>,
    pub refuse_description: Option<String>,
    pub refuse: Option<i16>,
    pub scientific_name: Option<String>,
    pub nitrogen_factor: Option<String>,
    pub protein_factor: Option<String>,
    pub fat_factor: Option<String>,
    pub cho_factor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Weight {
    pub id: i32,
    pub food_description_id: String,
    pub sequence: i16,
    pub amount: String,
    pub measure_description: String,
    pub gram_weight: String,
    pub number_data_points: Option<i16>,
    pub standard_deviation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Footnote {
    pub id: i32,
    pub food_description_id: String,
    pub footnote_no: String,
    pub footnote_type: String,
    pub nutrient_definition_id: Option<String>,
    pub footnote_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NutrientDefinition {
    pub nutrient_number: String,
    pub units: String,
    pub tagname: Option<String>,
    pub nutrient_description: String,
    pub num_decimal_places: String,
    pub sort_order: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SourceCode {
    pub source_code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DerivationCode {
    pub code: String,
    pub description: String,
}

/// A food with the rows that hang off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDetail {
    #[serde(flatten)]
    pub food: FoodDescription,
    pub weights: Vec<Weight>,
    pub footnotes: Vec<Footnote>,
}

// ===== Response Envelopes =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub page: i64,
    pub size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PageMetadata {
    pub fn new(page: i64, size: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + size - 1) / size
        };

        Self {
            page,
            size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: PageMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_rounds_up() {
        let meta = PageMetadata::new(1, 50, 101);
        assert_eq!(meta.total_pages, 3);

        let empty = PageMetadata::new(1, 50, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_food_detail_flattens_food_fields() {
        let detail = FoodDetail {
            food: FoodDescription {
                ndb_no: "01001".to_string(),
                food_group_id: "0100".to_string(),
                long_desc: "Butter, salted".to_string(),
                short_desc: "BUTTER,WITH SALT".to_string(),
                com_name: None,
                manufacturer_name: None,
                survey: Some(true),
                refuse_description: None,
                refuse: Some(0),
                scientific_name: None,
                nitrogen_factor: Some("6.38".to_string()),
                protein_factor: None,
                fat_factor: None,
                cho_factor: None,
            },
            weights: Vec::new(),
            footnotes: Vec::new(),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["ndb_no"], "01001");
        assert_eq!(json["nitrogen_factor"], "6.38");
        assert!(json["weights"].as_array().unwrap().is_empty());
    }
}
