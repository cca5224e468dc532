use crate::{
    commands::{ensure_absent, Command},
    entities::{
        empty_ids,
        supplier::{self, Entity as Supplier},
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddSupplierCommand {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[async_trait]
impl Command for AddSupplierCommand {
    type Refs = ();
    type Output = supplier::Model;

    const NAME: &'static str = "add_supplier";

    async fn resolve(&self, _txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        Ok(())
    }

    async fn check(&self, txn: &DatabaseTransaction, _refs: &()) -> Result<(), ServiceError> {
        let existing = Supplier::find()
            .filter(supplier::Column::Name.eq(self.name.as_str()))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedSupplier)
    }

    async fn apply(&self, txn: &DatabaseTransaction, _refs: ()) -> Result<Self::Output, ServiceError> {
        supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.clone()),
            phone: Set(self.phone.clone()),
            address: Set(self.address.clone()),
            product_ids: Set(empty_ids()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedSupplier))
    }
}
