use super::{ensure_transition, find_request, transition};
use crate::{
    commands::Command,
    entities::importing_request::{self, ImportingRequestStatus},
    errors::ServiceError,
};
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct CancelImportingRequestCommand {
    pub importing_request_id: Uuid,
    pub handler_id: Uuid,
}

#[async_trait]
impl Command for CancelImportingRequestCommand {
    type Refs = importing_request::Model;
    type Output = importing_request::Model;

    const NAME: &'static str = "cancel_importing_request";

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        find_request(txn, self.importing_request_id).await
    }

    async fn check(
        &self,
        _txn: &DatabaseTransaction,
        request: &Self::Refs,
    ) -> Result<(), ServiceError> {
        ensure_transition(request, ImportingRequestStatus::Cancelled)
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        request: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        transition(txn, request, ImportingRequestStatus::Cancelled, self.handler_id).await
    }
}
