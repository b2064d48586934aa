//! 落盘引擎与示例数据测试

use morsel_server::db::models::RestaurantCreate;
use morsel_server::db::repository::RestaurantRepository;
use morsel_server::db::{DbService, seed};

#[tokio::test]
async fn test_rocksdb_round_trip() {
    let dir = tempfile::tempdir().expect("scratch dir");
    let db_path = dir.path().join("morsel.db");

    let service = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("on-disk db");

    let repo = RestaurantRepository::new(service.db.clone());
    let created = repo
        .create(RestaurantCreate {
            account: None,
            name: "Golden Wok".to_string(),
            description: "wok hei".to_string(),
            address: Some("12 Lantern Street".to_string()),
            phone_number: None,
            opening_time: None,
            closing_time: None,
        })
        .await
        .expect("restaurant created");

    let id = created.id.expect("id");
    let found = repo
        .find_by_id(&id.to_string())
        .await
        .expect("query")
        .expect("restaurant exists");
    assert_eq!(found.name, "Golden Wok");
    assert_eq!(found.address.as_deref(), Some("12 Lantern Street"));
}

#[tokio::test]
async fn test_seed_catalog_is_idempotent() {
    let db = DbService::memory().await.expect("in-memory db").db;

    seed::seed_catalog(&db).await.expect("first seed");
    let repo = RestaurantRepository::new(db.clone());
    let after_first = repo.find_all().await.expect("query").len();
    assert!(after_first > 0);

    // A second run must not duplicate the catalog
    seed::seed_catalog(&db).await.expect("second seed");
    let after_second = repo.find_all().await.expect("query").len();
    assert_eq!(after_first, after_second);
}
