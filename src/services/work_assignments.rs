use crate::{
    commands::{execute, work_assignments::AddWorkAssignmentCommand},
    db::DbPool,
    entities::work_assignment,
    errors::ServiceError,
};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct WorkAssignmentService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl WorkAssignmentService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_work_assignment(
        &self,
        command: AddWorkAssignmentCommand,
    ) -> Result<work_assignment::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }
}
