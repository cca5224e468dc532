use crate::{
    commands::{execute, suppliers::AddSupplierCommand},
    db::DbPool,
    entities::supplier::{self, Entity as Supplier},
    errors::ServiceError,
};
use sea_orm::{EntityTrait, QueryOrder};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_supplier(
        &self,
        command: AddSupplierCommand,
    ) -> Result<supplier::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        Ok(Supplier::find()
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }
}
