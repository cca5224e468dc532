pub mod accept_importing_requests_command;
pub mod cancel_importing_request_command;
pub mod create_importing_request_command;

use crate::{
    commands::find_required,
    entities::importing_request::{self, ImportingRequestStatus},
    errors::{ErrorCode, ServiceError},
};
use sea_orm::{ActiveModelTrait, DatabaseTransaction, IntoActiveModel, Set};
use uuid::Uuid;

pub use accept_importing_requests_command::AcceptImportingRequestsCommand;
pub use cancel_importing_request_command::CancelImportingRequestCommand;
pub use create_importing_request_command::CreateImportingRequestCommand;

async fn find_request(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<importing_request::Model, ServiceError> {
    find_required::<importing_request::Entity, _>(txn, id, ErrorCode::ImportingRequestNotFound)
        .await
}

fn ensure_transition(
    request: &importing_request::Model,
    next: ImportingRequestStatus,
) -> Result<(), ServiceError> {
    if request.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(ServiceError::BusinessRule(
            ErrorCode::InvalidImportingRequestStatus,
        ))
    }
}

/// Moves a pending request to `next`, recording the manager who handled it
async fn transition(
    txn: &DatabaseTransaction,
    request: importing_request::Model,
    next: ImportingRequestStatus,
    handler_id: Uuid,
) -> Result<importing_request::Model, ServiceError> {
    let mut active = request.into_active_model();
    active.status = Set(next);
    active.handler_id = Set(Some(handler_id));
    Ok(active.update(txn).await?)
}
