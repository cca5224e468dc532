use crate::{
    commands::{categories::AddCategoryCommand, execute},
    db::DbPool,
    entities::category::{self, Entity as Category},
    errors::ServiceError,
};
use sea_orm::{EntityTrait, QueryOrder};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_category(
        &self,
        command: AddCategoryCommand,
    ) -> Result<category::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(Category::find()
            .order_by_asc(category::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }
}
