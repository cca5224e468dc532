//! Scheduling flows: schedules, shifts, assignments and the nested read.

mod common;

use axum::http::StatusCode;
use common::{id_of, TestApp};
use retail_store_api::entities::user::UserRole;
use serde_json::{json, Value};

async fn create_schedule(app: &TestApp, month: i64, year: i64) -> common::TestResponse {
    app.post(
        "/api/v1/work-schedules",
        &app.manager,
        json!({ "month": month, "year": year }),
    )
    .await
}

async fn create_shift(
    app: &TestApp,
    schedule_id: &str,
    start: &str,
    end: &str,
) -> common::TestResponse {
    app.post(
        "/api/v1/work-shifts",
        &app.manager,
        json!({ "workScheduleId": schedule_id, "startTime": start, "endTime": end }),
    )
    .await
}

#[tokio::test]
async fn schedule_month_out_of_range_is_rejected() {
    let app = TestApp::new().await;

    let response = create_schedule(&app, 13, 2024).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_WORK_MONTH"));
}

#[tokio::test]
async fn schedule_year_before_2020_is_rejected() {
    let app = TestApp::new().await;

    let response = create_schedule(&app, 5, 2019).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_WORK_YEAR"));
}

#[tokio::test]
async fn second_schedule_for_same_period_is_rejected() {
    let app = TestApp::new().await;

    let first = create_schedule(&app, 5, 2024).await;
    assert_eq!(first.status, StatusCode::OK, "{}", first.body);
    assert_eq!(first.message(), Some("ADD_WORK_SCHEDULE_SUCCESS"));
    assert_eq!(first.data("workSchedule")["workShiftIds"], json!([]));

    let second = create_schedule(&app, 5, 2024).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), Some("DUPLICATED_WORK_SCHEDULE"));
}

#[tokio::test]
async fn schedule_gate_requires_month_and_year() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/work-schedules", &app.manager, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.body["errors"].as_array().expect("errors list");
    assert!(errors.contains(&json!("\"month\" is required")));
    assert!(errors.contains(&json!("\"year\" is required")));
}

#[tokio::test]
async fn shift_outside_schedule_month_is_rejected() {
    let app = TestApp::new().await;
    let schedule = create_schedule(&app, 5, 2024).await;
    let schedule_id = id_of(schedule.data("workSchedule"));

    let april = create_shift(
        &app,
        &schedule_id,
        "2024-04-10T08:00:00Z",
        "2024-04-10T16:00:00Z",
    )
    .await;
    assert_eq!(april.status, StatusCode::BAD_REQUEST);
    assert_eq!(april.error_code(), Some("INVALID_WORK_SHIFT_TIME_RANGE"));

    let inverted = create_shift(
        &app,
        &schedule_id,
        "2024-05-10T16:00:00Z",
        "2024-05-10T08:00:00Z",
    )
    .await;
    assert_eq!(inverted.error_code(), Some("INVALID_WORK_SHIFT_TIME_RANGE"));
}

#[tokio::test]
async fn shift_for_unknown_schedule_is_not_found() {
    let app = TestApp::new().await;

    let response = create_shift(
        &app,
        &uuid::Uuid::new_v4().to_string(),
        "2024-05-10T08:00:00Z",
        "2024-05-10T16:00:00Z",
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("WORK_SCHEDULE_NOT_FOUND"));
}

#[tokio::test]
async fn shifts_are_appended_to_schedule_and_deduplicated() {
    let app = TestApp::new().await;
    let schedule = create_schedule(&app, 5, 2024).await;
    let schedule_id = id_of(schedule.data("workSchedule"));

    let shift = create_shift(
        &app,
        &schedule_id,
        "2024-05-10T08:00:00Z",
        "2024-05-10T16:00:00Z",
    )
    .await;
    assert_eq!(shift.status, StatusCode::OK, "{}", shift.body);
    assert_eq!(shift.message(), Some("ADD_WORK_SHIFT_SUCCESS"));
    let shift_id = id_of(shift.data("workShift"));

    let duplicate = create_shift(
        &app,
        &schedule_id,
        "2024-05-10T08:00:00Z",
        "2024-05-10T16:00:00Z",
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.error_code(), Some("DUPLICATED_WORK_SHIFT"));

    let shifts = app.get("/api/v1/work-shifts", &app.cashier).await;
    assert_eq!(shifts.status, StatusCode::OK);
    let listed = shifts.data("workShifts").as_array().expect("shift list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["workSchedule"]["id"], json!(schedule_id));
    assert!(listed[0]["workSchedule"].get("workShiftIds").is_none());
    assert_eq!(listed[0]["workAssignments"], json!([]));

    let schedules = app.get("/api/v1/work-schedules", &app.cashier).await;
    let tree = &schedules.data("workSchedules")[0];
    assert_eq!(tree["workShifts"][0]["id"], json!(shift_id));
}

#[tokio::test]
async fn caller_is_assigned_once_per_shift() {
    let app = TestApp::new().await;
    let schedule = create_schedule(&app, 6, 2024).await;
    let schedule_id = id_of(schedule.data("workSchedule"));
    let shift = create_shift(
        &app,
        &schedule_id,
        "2024-06-01T09:00:00Z",
        "2024-06-01T17:00:00Z",
    )
    .await;
    let shift_id = id_of(shift.data("workShift"));

    let assigned = app
        .post(
            "/api/v1/work-assignments",
            &app.cashier,
            json!({ "workShiftId": shift_id }),
        )
        .await;
    assert_eq!(assigned.status, StatusCode::OK, "{}", assigned.body);
    assert_eq!(assigned.message(), Some("ADD_WORK_ASSIGNMENT_SUCCESS"));
    assert_eq!(
        assigned.data("workAssignment")["assignerId"],
        json!(app.cashier.id())
    );

    let again = app
        .post(
            "/api/v1/work-assignments",
            &app.cashier,
            json!({ "workShiftId": shift_id }),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_code(), Some("DUPLICATED_WORK_ASSIGNMENT"));

    let other_actor = app
        .post(
            "/api/v1/work-assignments",
            &app.manager,
            json!({ "workShiftId": shift_id }),
        )
        .await;
    assert_eq!(other_actor.status, StatusCode::OK);
}

#[tokio::test]
async fn assignment_requires_known_shift_and_profile() {
    let app = TestApp::new().await;

    let unknown_shift = app
        .post(
            "/api/v1/work-assignments",
            &app.cashier,
            json!({ "workShiftId": uuid::Uuid::new_v4() }),
        )
        .await;
    assert_eq!(unknown_shift.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_shift.error_code(), Some("WORK_SHIFT_NOT_FOUND"));

    let schedule = create_schedule(&app, 7, 2024).await;
    let shift = create_shift(
        &app,
        &id_of(schedule.data("workSchedule")),
        "2024-07-02T09:00:00Z",
        "2024-07-02T17:00:00Z",
    )
    .await;
    let ghost = app.token_for(uuid::Uuid::new_v4(), UserRole::Cashier);
    let unknown_user = app
        .request(
            axum::http::Method::POST,
            "/api/v1/work-assignments",
            Some(&ghost),
            Some(json!({ "workShiftId": id_of(shift.data("workShift")) })),
        )
        .await;
    assert_eq!(unknown_user.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_user.error_code(), Some("USER_NOT_FOUND"));
}

#[tokio::test]
async fn nested_read_sorts_shifts_and_exposes_public_profiles() {
    let app = TestApp::new().await;
    let may = id_of(create_schedule(&app, 5, 2024).await.data("workSchedule"));
    let june = id_of(create_schedule(&app, 6, 2024).await.data("workSchedule"));

    let late = create_shift(&app, &may, "2024-05-20T12:00:00Z", "2024-05-20T20:00:00Z").await;
    let early = create_shift(&app, &may, "2024-05-02T06:00:00Z", "2024-05-02T14:00:00Z").await;
    create_shift(&app, &june, "2024-06-03T06:00:00Z", "2024-06-03T14:00:00Z").await;

    let late_id = id_of(late.data("workShift"));
    let early_id = id_of(early.data("workShift"));
    let assigned = app
        .post(
            "/api/v1/work-assignments",
            &app.cashier,
            json!({ "workShiftId": late_id }),
        )
        .await;
    assert_eq!(assigned.status, StatusCode::OK, "{}", assigned.body);

    let response = app.get("/api/v1/work-schedules", &app.importer).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), Some("GET_WORK_SCHEDULES_SUCCESS"));

    let schedules = response.data("workSchedules").as_array().expect("list");
    assert_eq!(schedules.len(), 2);
    let may_tree = schedules
        .iter()
        .find(|s| s["id"] == json!(may))
        .expect("may schedule present");

    let shift_ids: Vec<&Value> = may_tree["workShifts"]
        .as_array()
        .expect("shifts")
        .iter()
        .map(|s| &s["id"])
        .collect();
    assert_eq!(shift_ids, vec![&json!(early_id), &json!(late_id)]);

    let assignment = &may_tree["workShifts"][1]["workAssignments"][0];
    assert!(assignment.get("workShiftId").is_none());
    let assigner = &assignment["assigner"];
    assert_eq!(assigner["id"], json!(app.cashier.id()));
    assert_eq!(assigner["role"], "cashier");
    assert!(assigner.get("email").is_none());
}

#[tokio::test]
async fn only_managers_create_schedules_and_shifts() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/work-schedules",
            &app.cashier,
            json!({ "month": 5, "year": 2024 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("PERMISSION_DENIED"));

    let shift = app
        .post(
            "/api/v1/work-shifts",
            &app.importer,
            json!({
                "workScheduleId": uuid::Uuid::new_v4(),
                "startTime": "2024-05-10T08:00:00Z",
                "endTime": "2024-05-10T16:00:00Z",
            }),
        )
        .await;
    assert_eq!(shift.status, StatusCode::UNAUTHORIZED);
}
