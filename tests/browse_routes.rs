use rocket::http::Status;
use serde_json::Value;
use usda_nutrition::import::{ImportPlan, ImportRunner, RunOptions};
use usda_nutrition::test_support::{SourceDir, TestDatabase, TestRocketBuilder};

async fn seeded_database(test_name: &str) -> Option<TestDatabase> {
    let test_db = match TestDatabase::new_from_env().await {
        Ok(db) => db,
        Err(err) if err.is_unavailable() => {
            eprintln!("skipping {test_name}: {err}");
            return None;
        }
        Err(err) => panic!("failed to provision test database: {err:?}"),
    };

    let dir = SourceDir::new().expect("temp dir");
    dir.write("DERIV_CD.txt", &["~A~^~Analytical data~"]).expect("write DERIV_CD");
    dir.write(
        "FD_GROUP.txt",
        &["~0100~^~Dairy and Egg Products~", "~0200~^~Spices and Herbs~", "~0300~^~Baby Foods~"],
    )
    .expect("write FD_GROUP");
    dir.write(
        "FOOD_DES.txt",
        &[
            "~01001~^~0100~^~Butter, salted~^~BUTTER,WITH SALT~^~~^~~^~Y~^~~^0^~~^6.38^4.27^8.79^3.87",
            "~01002~^~0100~^~Butter, whipped, with salt~^~BUTTER,WHIPPED,W/ SALT~^~~^~~^~N~^~~^0^~~^6.38^^^",
            "~02001~^~0200~^~Spices, allspice, ground~^~ALLSPICE,GROUND~^~~^~~^~~^~~^0^~Pimenta dioica~^6.25^4.00^8.40^3.90",
        ],
    )
    .expect("write FOOD_DES");
    dir.write(
        "WEIGHT.txt",
        &["~01001~^2^1^~tbsp~^14.2^^", "~01001~^1^1^~pat~^5.0^^"],
    )
    .expect("write WEIGHT");
    dir.write("SRC_CD.txt", &["~1~^~Analytical~", "~12~^~Manufacturer's analytical~"])
        .expect("write SRC_CD");
    dir.write(
        "NUTR_DEF.txt",
        &["~204~^~g~^~FAT~^~Total lipid (fat)~^~2~^~800~", "~203~^~g~^~PROCNT~^~Protein~^~2~^~600~"],
    )
    .expect("write NUTR_DEF");
    dir.write("FOOTNOTE.txt", &["~01001~^~01~^~D~^~~^~Sodium value for salted butter~"])
        .expect("write FOOTNOTE");

    ImportRunner::silent(test_db.pool_clone(), RunOptions::new(dir.path()))
        .run(&ImportPlan::sr28())
        .await
        .expect("seed import succeeds");

    Some(test_db)
}

#[tokio::test]
async fn food_groups_include_food_counts() {
    let Some(test_db) = seeded_database("food_groups_include_food_counts").await else {
        return;
    };

    let client = TestRocketBuilder::new()
        .mount_browse_api()
        .manage_pg_pool(test_db.pool_clone())
        .async_client()
        .await;

    let response = client.get("/api/v1/food-groups").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let payload: Value = response.into_json().await.expect("valid JSON payload");
    let groups = payload["data"].as_array().expect("data array");
    let summary: Vec<(&str, i64)> = groups
        .iter()
        .map(|group| {
            (
                group["code"].as_str().unwrap_or_default(),
                group["food_count"].as_i64().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(summary, vec![("0100", 2), ("0200", 1), ("0300", 0)]);

    drop(client);
    test_db.close().await.expect("failed to drop test database");
}

#[tokio::test]
async fn foods_are_paginated_and_filtered_by_group() {
    let Some(test_db) = seeded_database("foods_are_paginated_and_filtered_by_group").await else {
        return;
    };

    let client = TestRocketBuilder::new()
        .mount_browse_api()
        .manage_pg_pool(test_db.pool_clone())
        .async_client()
        .await;

    let response = client.get("/api/v1/foods?page=2&size=2").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let payload: Value = response.into_json().await.expect("valid JSON payload");
    assert_eq!(payload["page"]["totalItems"], 3);
    assert_eq!(payload["page"]["totalPages"], 2);
    assert_eq!(payload["data"][0]["ndb_no"], "02001");

    let response = client.get("/api/v1/foods?group=0100").dispatch().await;
    let payload: Value = response.into_json().await.expect("valid JSON payload");
    let foods: Vec<&str> = payload["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|food| food["short_desc"].as_str())
        .collect();
    assert_eq!(foods, vec!["BUTTER,WITH SALT", "BUTTER,WHIPPED,W/ SALT"]);

    let status = client.get("/api/v1/foods?group=9999").dispatch().await.status();
    assert_eq!(status, Status::NotFound);

    let response = client
        .get("/api/v1/foods?page=9223372036854775807")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let payload: Value = response.into_json().await.expect("valid JSON error");
    assert_eq!(payload["error"], "BadRequest");

    drop(client);
    test_db.close().await.expect("failed to drop test database");
}

#[tokio::test]
async fn food_detail_includes_weights_and_footnotes() {
    let Some(test_db) = seeded_database("food_detail_includes_weights_and_footnotes").await else {
        return;
    };

    let client = TestRocketBuilder::new()
        .mount_browse_api()
        .manage_pg_pool(test_db.pool_clone())
        .async_client()
        .await;

    let response = client.get("/api/v1/foods/01001").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let payload: Value = response.into_json().await.expect("valid JSON payload");
    let food = &payload["data"];
    assert_eq!(food["long_desc"], "Butter, salted");
    assert_eq!(food["survey"], true);
    assert_eq!(food["fat_factor"], "8.79");

    let measures: Vec<&str> = food["weights"]
        .as_array()
        .expect("weights array")
        .iter()
        .filter_map(|weight| weight["measure_description"].as_str())
        .collect();
    assert_eq!(measures, vec!["pat", "tbsp"]);
    assert_eq!(food["weights"][1]["gram_weight"], "14.2");

    assert_eq!(food["footnotes"][0]["footnote_type"], "D");
    assert!(food["footnotes"][0]["nutrient_definition_id"].is_null());

    let status = client.get("/api/v1/foods/99999").dispatch().await.status();
    assert_eq!(status, Status::NotFound);

    drop(client);
    test_db.close().await.expect("failed to drop test database");
}

#[tokio::test]
async fn code_tables_are_ordered() {
    let Some(test_db) = seeded_database("code_tables_are_ordered").await else {
        return;
    };

    let client = TestRocketBuilder::new()
        .mount_browse_api()
        .manage_pg_pool(test_db.pool_clone())
        .async_client()
        .await;

    let response = client.get("/api/v1/nutrients").dispatch().await;
    let payload: Value = response.into_json().await.expect("valid JSON payload");
    assert_eq!(payload["data"][0]["tagname"], "PROCNT");
    assert_eq!(payload["data"][1]["sort_order"], 800);

    let response = client.get("/api/v1/source-codes").dispatch().await;
    let payload: Value = response.into_json().await.expect("valid JSON payload");
    assert_eq!(payload["data"].as_array().map(Vec::len), Some(2));

    let response = client.get("/api/v1/derivation-codes").dispatch().await;
    let payload: Value = response.into_json().await.expect("valid JSON payload");
    assert_eq!(payload["data"][0]["code"], "A");

    drop(client);
    test_db.close().await.expect("failed to drop test database");
}
