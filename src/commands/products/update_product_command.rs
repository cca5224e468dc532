use super::{ensure_valid_price, ensure_valid_quantity};
use crate::{
    commands::{find_required, Command},
    entities::{
        product::{self, Entity as Product},
        user::UserRole,
    },
    errors::{ErrorCode, ServiceError},
    services::users::check_user_permission,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use uuid::Uuid;

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: Uuid,
    pub actor_id: Uuid,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub available_quantity: Option<i32>,
}

#[async_trait]
impl Command for UpdateProductCommand {
    type Refs = product::Model;
    type Output = product::Model;

    const NAME: &'static str = "update_product";

    async fn admit(&self, txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        if !check_user_permission(txn, self.actor_id, UserRole::Importer).await? {
            return Err(ServiceError::PermissionDenied(ErrorCode::PermissionDenied));
        }
        if let Some(quantity) = self.available_quantity {
            ensure_valid_quantity(quantity)?;
        }
        if let Some(price) = self.price {
            ensure_valid_price(price)?;
        }
        Ok(())
    }

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        find_required::<Product, _>(txn, self.product_id, ErrorCode::ProductNotFound).await
    }

    async fn check(
        &self,
        txn: &DatabaseTransaction,
        current: &Self::Refs,
    ) -> Result<(), ServiceError> {
        let Some(name) = self.name.as_deref().filter(|n| *n != current.name) else {
            return Ok(());
        };
        let clash = Product::find()
            .filter(product::Column::Name.eq(name))
            .filter(product::Column::Id.ne(current.id))
            .one(txn)
            .await?;
        match clash {
            Some(_) => Err(ServiceError::BusinessRule(ErrorCode::DuplicatedProduct)),
            None => Ok(()),
        }
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        current: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let mut changes = current.clone().into_active_model();
        if let Some(name) = self.name.as_ref().filter(|n| **n != current.name) {
            changes.name = Set(name.clone());
        }
        if let Some(price) = self.price.filter(|p| *p != current.price) {
            changes.price = Set(price);
        }
        if let Some(quantity) = self
            .available_quantity
            .filter(|q| *q != current.available_quantity)
        {
            changes.available_quantity = Set(quantity);
        }

        if !changes.is_changed() {
            return Ok(current);
        }

        changes
            .update(txn)
            .await
            .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedProduct))
    }
}
