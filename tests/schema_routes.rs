use rocket::http::Status;
use rocket::routes;
use serde_json::Value;
use usda_nutrition::routes::schema::{get_entity, list_entities};
use usda_nutrition::test_support::TestRocketBuilder;

#[test]
fn entities_are_listed_in_import_order() {
    let client = TestRocketBuilder::new()
        .mount_api_routes(routes![list_entities, get_entity])
        .blocking_client();

    let response = client.get("/api/v1/schema/entities").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let payload: Value = response.into_json().expect("valid JSON payload");
    let names: Vec<&str> = payload["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|entity| entity["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "derivation_code",
            "food_group",
            "food_description",
            "weight",
            "source_code",
            "nutrient_definition",
            "footnote",
        ]
    );
}

#[test]
fn entity_lookup_describes_fields() {
    let client = TestRocketBuilder::new()
        .mount_api_routes(routes![list_entities, get_entity])
        .blocking_client();

    let response = client.get("/api/v1/schema/entities/FoodDescription").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let payload: Value = response.into_json().expect("valid JSON payload");
    let fields = payload["data"]["fields"].as_array().expect("fields array");
    let survey = fields
        .iter()
        .find(|field| field["name"] == "survey")
        .expect("survey field");
    assert_eq!(survey["kind"]["type"], "boolean");
    assert_eq!(survey["nullable"], true);

    let response = client.get("/api/v1/schema/entities/Recipe").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let payload: Value = response.into_json().expect("valid JSON error");
    assert_eq!(payload["error"], "NotFound");
}
