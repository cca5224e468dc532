use super::common::{required, ValidatedJson};
use crate::{
    auth::AuthUser, commands::work_assignments::AddWorkAssignmentCommand, keyed, ApiResponse,
    ApiResult, AppState, SuccessMessage,
};
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkAssignmentRequest {
    #[serde(alias = "workShiftID")]
    #[validate(required)]
    pub work_shift_id: Option<Uuid>,
}

/// Assigns the caller to the given shift
pub async fn add_work_assignment(
    State(state): State<AppState>,
    actor: AuthUser,
    ValidatedJson(payload): ValidatedJson<AddWorkAssignmentRequest>,
) -> ApiResult {
    let command = AddWorkAssignmentCommand {
        work_shift_id: required("workShiftId", payload.work_shift_id)?,
        assigner_id: actor.user_id,
    };
    let assignment = state
        .services
        .work_assignments
        .add_work_assignment(command)
        .await?;
    Ok(ApiResponse::ok(
        keyed("workAssignment", assignment)?,
        SuccessMessage::AddWorkAssignmentSuccess,
    ))
}
