use super::common::{parse_id, required, ValidatedJson};
use crate::{
    auth::AuthUser,
    commands::importing_requests::{
        AcceptImportingRequestsCommand, CancelImportingRequestCommand,
        CreateImportingRequestCommand,
    },
    keyed, ApiResponse, ApiResult, AppState, SuccessMessage,
};
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImportingRequestRequest {
    #[serde(alias = "productID")]
    #[validate(required)]
    pub product_id: Option<Uuid>,
    #[validate(required)]
    pub quantity: Option<i32>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptImportingRequestsRequest {
    #[validate(required, length(min = 1))]
    pub importing_request_ids: Option<Vec<Uuid>>,
}

pub async fn get_importing_requests(State(state): State<AppState>) -> ApiResult {
    let requests = state
        .services
        .importing_requests
        .list_importing_requests()
        .await?;
    Ok(ApiResponse::ok(
        keyed("importingRequests", requests)?,
        SuccessMessage::GetImportingRequestsSuccess,
    ))
}

pub async fn create_importing_request(
    State(state): State<AppState>,
    actor: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateImportingRequestRequest>,
) -> ApiResult {
    let command = CreateImportingRequestCommand {
        product_id: required("productId", payload.product_id)?,
        quantity: required("quantity", payload.quantity)?,
        note: payload.note,
        requester_id: actor.user_id,
    };
    let request = state
        .services
        .importing_requests
        .create_importing_request(command)
        .await?;
    Ok(ApiResponse::ok(
        keyed("importingRequest", request)?,
        SuccessMessage::CreateImportingRequestSuccess,
    ))
}

pub async fn accept_importing_requests(
    State(state): State<AppState>,
    actor: AuthUser,
    ValidatedJson(payload): ValidatedJson<AcceptImportingRequestsRequest>,
) -> ApiResult {
    let ids = required("importingRequestIds", payload.importing_request_ids)?;
    let accepted = state
        .services
        .importing_requests
        .accept_importing_requests(AcceptImportingRequestsCommand::new(ids, actor.user_id))
        .await?;
    Ok(ApiResponse::ok(
        keyed("importingRequests", accepted)?,
        SuccessMessage::AcceptImportingRequestsSuccess,
    ))
}

pub async fn cancel_importing_request(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<String>,
) -> ApiResult {
    let command = CancelImportingRequestCommand {
        importing_request_id: parse_id("id", &id)?,
        handler_id: actor.user_id,
    };
    let request = state
        .services
        .importing_requests
        .cancel_importing_request(command)
        .await?;
    Ok(ApiResponse::ok(
        keyed("importingRequest", request)?,
        SuccessMessage::CancelImportingRequestSuccess,
    ))
}
