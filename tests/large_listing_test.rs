//! Listings stay within the store's bind-parameter limit for large tables.

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::TestApp;
use retail_store_api::entities::{empty_ids, product, work_schedule, work_shift};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, Set};
use uuid::Uuid;

/// More rows than SQLite accepts as bind parameters in one statement (32766).
const ROWS: usize = 33_000;
const INSERT_BATCH: usize = 2_000;

#[tokio::test]
async fn product_listing_survives_a_large_catalog() {
    let app = TestApp::new().await;
    let (category_id, supplier_id) = app.seed_catalog().await;
    let category_id = Uuid::parse_str(&category_id).expect("category id");
    let supplier_id = Uuid::parse_str(&supplier_id).expect("supplier id");

    let now = Utc::now();
    let rows: Vec<product::ActiveModel> = (0..ROWS)
        .map(|i| product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(format!("bulk product {}", i)),
            price: Set(Decimal::new(199, 2)),
            available_quantity: Set(1),
            category_id: Set(category_id),
            supplier_id: Set(supplier_id),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();
    for batch in rows.chunks(INSERT_BATCH) {
        product::Entity::insert_many(batch.to_vec())
            .exec(&*app.state.db)
            .await
            .expect("insert products");
    }

    let products = app
        .state
        .services
        .products
        .list_products()
        .await
        .expect("listing a large catalog");

    assert_eq!(products.len(), ROWS);
    assert!(products.iter().all(|p| {
        p.category.as_ref().map(|c| c.id) == Some(category_id)
            && p.supplier.as_ref().map(|s| s.id) == Some(supplier_id)
    }));
}

#[tokio::test]
async fn shift_listing_survives_many_shifts() {
    let app = TestApp::new().await;
    let now = Utc::now();
    let schedule_id = Uuid::new_v4();
    work_schedule::Entity::insert(work_schedule::ActiveModel {
        id: Set(schedule_id),
        month: Set(5),
        year: Set(2024),
        work_shift_ids: Set(empty_ids()),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .exec(&*app.state.db)
    .await
    .expect("insert schedule");

    let month_start = Utc
        .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    let rows: Vec<work_shift::ActiveModel> = (0..ROWS)
        .map(|i| {
            let start = month_start + Duration::minutes(i as i64);
            work_shift::ActiveModel {
                id: Set(Uuid::new_v4()),
                work_schedule_id: Set(schedule_id),
                start_time: Set(start),
                end_time: Set(start + Duration::minutes(1)),
                work_assignment_ids: Set(empty_ids()),
                created_at: Set(now),
                updated_at: Set(now),
            }
        })
        .collect();
    for batch in rows.chunks(INSERT_BATCH) {
        work_shift::Entity::insert_many(batch.to_vec())
            .exec(&*app.state.db)
            .await
            .expect("insert shifts");
    }

    let shifts = app
        .state
        .services
        .work_shifts
        .list_work_shifts()
        .await
        .expect("listing many shifts");

    assert_eq!(shifts.len(), ROWS);
    assert!(shifts
        .iter()
        .all(|s| s.work_schedule.as_ref().map(|w| w.id) == Some(schedule_id)));
    assert!(shifts.windows(2).all(|w| w[0].start_time < w[1].start_time));
}
