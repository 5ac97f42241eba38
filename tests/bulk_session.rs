use usda_nutrition::database::session::BulkLoadSession;
use usda_nutrition::test_support::TestDatabase;

#[tokio::test]
async fn bulk_settings_last_only_for_the_transaction() {
    let test_db = match TestDatabase::new_from_env().await {
        Ok(db) => db,
        Err(err) if err.is_unavailable() => {
            eprintln!("skipping bulk session test: {err}");
            return;
        }
        Err(err) => panic!("failed to provision test database: {err:?}"),
    };

    let pool = test_db.pool_clone();

    let mut tx = pool.begin().await.expect("begin");
    let before = BulkLoadSession::current_settings(&mut tx).await.expect("read settings");
    BulkLoadSession::apply(&mut tx).await.expect("apply settings");
    let during = BulkLoadSession::current_settings(&mut tx).await.expect("read settings");
    tx.rollback().await.expect("rollback");

    assert_eq!(during.work_mem, "64MB");
    assert_eq!(during.maintenance_work_mem, "512MB");
    assert_eq!(during.synchronous_commit, "off");

    let mut tx = pool.begin().await.expect("begin");
    let after = BulkLoadSession::current_settings(&mut tx).await.expect("read settings");
    tx.rollback().await.expect("rollback");
    assert_eq!(after, before);

    BulkLoadSession::analyze_tables(&pool, &["usda_nutrition_foodgroup"])
        .await
        .expect("analyze succeeds");

    test_db.close().await.expect("failed to drop test database");
}
