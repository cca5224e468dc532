use super::common::{required, ValidatedJson};
use crate::{
    commands::work_shifts::AddWorkShiftCommand, keyed, ApiResponse, ApiResult, AppState,
    SuccessMessage,
};
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkShiftRequest {
    #[serde(alias = "workScheduleID")]
    #[validate(required)]
    pub work_schedule_id: Option<Uuid>,
    #[validate(required)]
    pub start_time: Option<DateTime<Utc>>,
    #[validate(required)]
    pub end_time: Option<DateTime<Utc>>,
}

pub async fn get_work_shifts(State(state): State<AppState>) -> ApiResult {
    let shifts = state.services.work_shifts.list_work_shifts().await?;
    Ok(ApiResponse::ok(
        keyed("workShifts", shifts)?,
        SuccessMessage::GetWorkShiftsSuccess,
    ))
}

pub async fn add_work_shift(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddWorkShiftRequest>,
) -> ApiResult {
    let command = AddWorkShiftCommand {
        work_schedule_id: required("workScheduleId", payload.work_schedule_id)?,
        start_time: required("startTime", payload.start_time)?,
        end_time: required("endTime", payload.end_time)?,
    };
    let shift = state.services.work_shifts.add_work_shift(command).await?;
    Ok(ApiResponse::ok(
        keyed("workShift", shift)?,
        SuccessMessage::AddWorkShiftSuccess,
    ))
}
