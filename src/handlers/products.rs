use super::common::{parse_id, required, ValidatedJson};
use crate::{
    auth::AuthUser,
    commands::products::{AddProductCommand, UpdateProductCommand},
    errors::ServiceError,
    keyed, ApiResponse, ApiResult, AppState, SuccessMessage,
};
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<Decimal>,
    pub available_quantity: Option<i32>,
    #[serde(alias = "categoryID")]
    #[validate(required)]
    pub category_id: Option<Uuid>,
    #[serde(alias = "supplierID")]
    #[validate(required)]
    pub supplier_id: Option<Uuid>,
}

impl AddProductRequest {
    fn into_command(self) -> Result<AddProductCommand, ServiceError> {
        Ok(AddProductCommand {
            name: required("name", self.name)?,
            price: required("price", self.price)?,
            available_quantity: self.available_quantity.unwrap_or(0),
            category_id: required("categoryId", self.category_id)?,
            supplier_id: required("supplierId", self.supplier_id)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub available_quantity: Option<i32>,
}

pub async fn get_products(State(state): State<AppState>) -> ApiResult {
    let products = state.services.products.list_products().await?;
    Ok(ApiResponse::ok(
        keyed("products", products)?,
        SuccessMessage::GetProductsSuccess,
    ))
}

pub async fn add_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddProductRequest>,
) -> ApiResult {
    let product = state
        .services
        .products
        .add_product(payload.into_command()?)
        .await?;

    info!(product_id = %product.id, "Product added");
    Ok(ApiResponse::ok(
        keyed("product", product)?,
        SuccessMessage::AddProductSuccess,
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> ApiResult {
    let command = UpdateProductCommand {
        product_id: parse_id("id", &id)?,
        actor_id: actor.user_id,
        name: payload.name,
        price: payload.price,
        available_quantity: payload.available_quantity,
    };
    let product = state.services.products.update_product(command).await?;

    Ok(ApiResponse::ok(
        keyed("product", product)?,
        SuccessMessage::UpdateProductSuccess,
    ))
}
