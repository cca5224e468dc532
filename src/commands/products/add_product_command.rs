use super::{ensure_valid_price, ensure_valid_quantity};
use crate::{
    commands::{ensure_absent, find_required, Command},
    entities::{
        append_id, category,
        product::{self, Entity as Product},
        supplier,
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddProductCommand {
    pub name: String,
    pub price: Decimal,
    pub available_quantity: i32,
    pub category_id: Uuid,
    pub supplier_id: Uuid,
}

pub struct ProductParents {
    pub category: category::Model,
    pub supplier: supplier::Model,
}

#[async_trait]
impl Command for AddProductCommand {
    type Refs = ProductParents;
    type Output = product::Model;

    const NAME: &'static str = "add_product";

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        let category =
            find_required::<category::Entity, _>(txn, self.category_id, ErrorCode::CategoryNotFound)
                .await?;
        let supplier =
            find_required::<supplier::Entity, _>(txn, self.supplier_id, ErrorCode::SupplierNotFound)
                .await?;
        Ok(ProductParents { category, supplier })
    }

    async fn check(
        &self,
        txn: &DatabaseTransaction,
        _refs: &Self::Refs,
    ) -> Result<(), ServiceError> {
        let existing = Product::find()
            .filter(product::Column::Name.eq(self.name.as_str()))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedProduct)?;
        ensure_valid_quantity(self.available_quantity)?;
        ensure_valid_price(self.price)
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        refs: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let created = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.clone()),
            price: Set(self.price),
            available_quantity: Set(self.available_quantity),
            category_id: Set(refs.category.id),
            supplier_id: Set(refs.supplier.id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedProduct))?;

        let product_ids = append_id(&refs.category.product_ids, created.id);
        let mut category = refs.category.into_active_model();
        category.product_ids = Set(product_ids);
        category.update(txn).await?;

        let product_ids = append_id(&refs.supplier.product_ids, created.id);
        let mut supplier = refs.supplier.into_active_model();
        supplier.product_ids = Set(product_ids);
        supplier.update(txn).await?;

        Ok(created)
    }
}
