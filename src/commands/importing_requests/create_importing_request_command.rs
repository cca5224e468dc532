use crate::{
    commands::{find_required, Command},
    entities::{
        importing_request::{self, ImportingRequestStatus},
        product,
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, Set};
use uuid::Uuid;

/// A cashier asking for more stock of a product
#[derive(Debug, Clone)]
pub struct CreateImportingRequestCommand {
    pub product_id: Uuid,
    pub quantity: i32,
    pub note: Option<String>,
    pub requester_id: Uuid,
}

#[async_trait]
impl Command for CreateImportingRequestCommand {
    type Refs = product::Model;
    type Output = importing_request::Model;

    const NAME: &'static str = "create_importing_request";

    async fn admit(&self, _txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        if self.quantity <= 0 {
            return Err(ServiceError::BusinessRule(
                ErrorCode::InvalidImportingQuantity,
            ));
        }
        Ok(())
    }

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        find_required::<product::Entity, _>(txn, self.product_id, ErrorCode::ProductNotFound).await
    }

    async fn check(
        &self,
        _txn: &DatabaseTransaction,
        _product: &Self::Refs,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        product: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let created = importing_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            quantity: Set(self.quantity),
            note: Set(self.note.clone()),
            requester_id: Set(self.requester_id),
            handler_id: Set(None),
            status: Set(ImportingRequestStatus::Pending),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(created)
    }
}
