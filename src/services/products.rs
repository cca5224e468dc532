use crate::{
    commands::{
        execute,
        products::{AddProductCommand, UpdateProductCommand},
    },
    db::DbPool,
    entities::{
        category::{self, Entity as Category},
        product::{self, Entity as Product},
        supplier::{self, Entity as Supplier},
    },
    errors::ServiceError,
    services::find_in_chunks,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use slog::Logger;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;
use uuid::Uuid;

/// Product with its category and supplier expanded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub available_quantity: i32,
    pub category: Option<category::Summary>,
    pub supplier: Option<supplier::Summary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service for managing products
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        command: AddProductCommand,
    ) -> Result<product::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    /// An empty change set still runs the permission and bounds checks, then
    /// returns the stored product without a write.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        command: UpdateProductCommand,
    ) -> Result<product::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    pub async fn list_products(&self) -> Result<Vec<ProductView>, ServiceError> {
        let db = &*self.db_pool;
        let rows = Product::find()
            .find_also_related(Category)
            .order_by_asc(product::Column::CreatedAt)
            .all(db)
            .await?;

        let suppliers: HashMap<Uuid, supplier::Summary> = find_in_chunks::<Supplier, _, _>(
            db,
            supplier::Column::Id,
            rows.iter().map(|(p, _)| p.supplier_id),
        )
        .await?
        .into_iter()
        .map(|s| (s.id, s.into()))
        .collect();

        Ok(rows
            .into_iter()
            .map(|(p, category)| ProductView {
                category: category.map(category::Summary::from),
                supplier: suppliers.get(&p.supplier_id).cloned(),
                id: p.id,
                name: p.name,
                price: p.price,
                available_quantity: p.available_quantity,
                created_at: p.created_at,
                updated_at: p.updated_at,
            })
            .collect())
    }
}
