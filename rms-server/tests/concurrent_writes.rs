//! Overlapping writers against a file-backed pool
//!
//! The in-memory database used elsewhere has a single connection, so these
//! run against a WAL database in a temp dir with the production pool.

use rms_server::db::DbService;
use rms_server::db::repository::{dining_table, menu, order, usage};
use shared::models::{DiningTableCreate, MenuCreate, OrderCreate};
use tokio::task::JoinSet;
use uuid::Uuid;

async fn file_db() -> (tempfile::TempDir, DbService) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("rms.db").display());
    let db = DbService::new(&url).await.unwrap();
    (dir, db)
}

async fn tables(db: &DbService, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let table = dining_table::create(
            &db.pool,
            DiningTableCreate {
                name: format!("T{i}"),
                seat: 4,
                passcode: "123456".into(),
                status: None,
            },
        )
        .await
        .unwrap();
        ids.push(table.id);
    }
    ids
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_orders_from_many_tables_at_once() {
    let (_dir, db) = file_db().await;
    let soup = menu::create(
        &db.pool,
        MenuCreate {
            name: "Soup".into(),
            price: 45.0,
            description: None,
            is_available: None,
        },
    )
    .await
    .unwrap();
    let menu_id = Uuid::parse_str(&soup.id).unwrap();

    let mut usage_ids = Vec::new();
    for table_id in tables(&db, 5).await {
        usage_ids.push(usage::open_or_get_active(&db.pool, &table_id).await.unwrap().id);
    }

    for _ in 0..10 {
        let mut set = JoinSet::new();
        for usage_id in usage_ids.clone() {
            let pool = db.pool.clone();
            set.spawn(async move {
                let items = [
                    OrderCreate { menu_id, quantity: 1 },
                    OrderCreate { menu_id, quantity: 2 },
                ];
                order::bulk_create(&pool, &usage_id, &items).await
            });
        }
        while let Some(joined) = set.join_next().await {
            let placed = joined.unwrap().unwrap();
            assert_eq!(placed.len(), 2);
        }
    }

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(total, 10 * 5 * 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_table_logins_share_one_usage() {
    let (_dir, db) = file_db().await;
    let table_ids = tables(&db, 10).await;

    let mut set = JoinSet::new();
    for table_id in &table_ids {
        for _ in 0..4 {
            let pool = db.pool.clone();
            let table_id = table_id.clone();
            set.spawn(async move {
                let usage = usage::open_or_get_active(&pool, &table_id).await;
                (table_id, usage)
            });
        }
    }

    let mut opened: Vec<(String, String)> = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (table_id, usage) = joined.unwrap();
        opened.push((table_id, usage.unwrap().id));
    }
    assert_eq!(opened.len(), 40);

    for table_id in &table_ids {
        let active = usage::find_active_by_table(&db.pool, table_id)
            .await
            .unwrap()
            .unwrap();
        assert!(
            opened
                .iter()
                .filter(|(t, _)| t == table_id)
                .all(|(_, usage_id)| *usage_id == active.id)
        );
    }

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usages WHERE ended_at IS NULL")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(active, 10);
}

#[tokio::test]
async fn test_second_active_usage_is_rejected() {
    let db = DbService::in_memory().await.unwrap();
    let table_id = tables(&db, 1).await.remove(0);
    usage::open_or_get_active(&db.pool, &table_id).await.unwrap();

    let inserted = sqlx::query("INSERT INTO usages (id, table_id, started_at) VALUES (?, ?, 0)")
        .bind(Uuid::new_v4().to_string())
        .bind(&table_id)
        .execute(&db.pool)
        .await;
    let err = inserted.unwrap_err();
    assert!(err.as_database_error().unwrap().is_unique_violation());

    // closed usages don't count
    usage::close_active(&db.pool, &table_id).await.unwrap();
    usage::open_or_get_active(&db.pool, &table_id).await.unwrap();
}
