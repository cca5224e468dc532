use super::common::{required, ValidatedJson};
use crate::{
    commands::suppliers::AddSupplierCommand, keyed, ApiResponse, ApiResult, AppState,
    SuccessMessage,
};
use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSupplierRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub async fn get_suppliers(State(state): State<AppState>) -> ApiResult {
    let suppliers = state.services.suppliers.list_suppliers().await?;
    Ok(ApiResponse::ok(
        keyed("suppliers", suppliers)?,
        SuccessMessage::GetSuppliersSuccess,
    ))
}

pub async fn add_supplier(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddSupplierRequest>,
) -> ApiResult {
    let command = AddSupplierCommand {
        name: required("name", payload.name)?,
        phone: payload.phone,
        address: payload.address,
    };
    let supplier = state.services.suppliers.add_supplier(command).await?;
    Ok(ApiResponse::ok(
        keyed("supplier", supplier)?,
        SuccessMessage::AddSupplierSuccess,
    ))
}
