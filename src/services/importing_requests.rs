use crate::{
    commands::{
        execute,
        importing_requests::{
            AcceptImportingRequestsCommand, CancelImportingRequestCommand,
            CreateImportingRequestCommand,
        },
    },
    db::DbPool,
    entities::{
        importing_request::{self, Entity as ImportingRequest, ImportingRequestStatus},
        product,
    },
    errors::ServiceError,
    metrics::IMPORTING_REQUEST_TRANSITIONS,
};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportingRequestView {
    #[serde(flatten)]
    pub request: importing_request::Model,
    pub product: Option<product::Model>,
}

/// Service for cashier-raised importing requests and their handling by managers
#[derive(Clone)]
pub struct ImportingRequestService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl ImportingRequestService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    /// Newest first, product expanded
    pub async fn list_importing_requests(&self) -> Result<Vec<ImportingRequestView>, ServiceError> {
        let rows = ImportingRequest::find()
            .find_also_related(product::Entity)
            .order_by_desc(importing_request::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(request, product)| ImportingRequestView { request, product })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn create_importing_request(
        &self,
        command: CreateImportingRequestCommand,
    ) -> Result<importing_request::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    #[instrument(skip(self))]
    pub async fn accept_importing_requests(
        &self,
        command: AcceptImportingRequestsCommand,
    ) -> Result<Vec<importing_request::Model>, ServiceError> {
        let accepted = execute(&self.db_pool, &self.logger, command).await?;
        record_transitions(ImportingRequestStatus::Accepted, accepted.len());
        slog::info!(self.logger, "importing requests accepted"; "count" => accepted.len());
        Ok(accepted)
    }

    #[instrument(skip(self))]
    pub async fn cancel_importing_request(
        &self,
        command: CancelImportingRequestCommand,
    ) -> Result<importing_request::Model, ServiceError> {
        let cancelled = execute(&self.db_pool, &self.logger, command).await?;
        record_transitions(ImportingRequestStatus::Cancelled, 1);
        Ok(cancelled)
    }
}

/// Counts transitions once their transaction has committed
fn record_transitions(status: ImportingRequestStatus, count: usize) {
    IMPORTING_REQUEST_TRANSITIONS
        .with_label_values(&[&status.to_string()])
        .inc_by(count as u64);
}
