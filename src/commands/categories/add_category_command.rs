use crate::{
    commands::{ensure_absent, Command},
    entities::{
        category::{self, Entity as Category},
        empty_ids,
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddCategoryCommand {
    pub name: String,
}

#[async_trait]
impl Command for AddCategoryCommand {
    type Refs = ();
    type Output = category::Model;

    const NAME: &'static str = "add_category";

    async fn resolve(&self, _txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        Ok(())
    }

    async fn check(&self, txn: &DatabaseTransaction, _refs: &()) -> Result<(), ServiceError> {
        let existing = Category::find()
            .filter(category::Column::Name.eq(self.name.as_str()))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedCategory)
    }

    async fn apply(&self, txn: &DatabaseTransaction, _refs: ()) -> Result<Self::Output, ServiceError> {
        category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.clone()),
            product_ids: Set(empty_ids()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedCategory))
    }
}
