use super::common::{required, ValidatedJson};
use crate::{
    commands::work_schedules::AddWorkScheduleCommand, keyed, ApiResponse, ApiResult, AppState,
    SuccessMessage,
};
use axum::extract::State;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Range checks on month/year belong to the command, not the gate
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkScheduleRequest {
    #[validate(required)]
    pub month: Option<i32>,
    #[validate(required)]
    pub year: Option<i32>,
}

pub async fn get_work_schedules(State(state): State<AppState>) -> ApiResult {
    let schedules = state.services.work_schedules.list_work_schedules().await?;
    Ok(ApiResponse::ok(
        keyed("workSchedules", schedules)?,
        SuccessMessage::GetWorkSchedulesSuccess,
    ))
}

pub async fn add_work_schedule(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddWorkScheduleRequest>,
) -> ApiResult {
    let command = AddWorkScheduleCommand {
        month: required("month", payload.month)?,
        year: required("year", payload.year)?,
    };
    let schedule = state
        .services
        .work_schedules
        .add_work_schedule(command)
        .await?;

    info!(work_schedule_id = %schedule.id, "Work schedule added");
    Ok(ApiResponse::ok(
        keyed("workSchedule", schedule)?,
        SuccessMessage::AddWorkScheduleSuccess,
    ))
}
