use super::common::{required, ValidatedJson};
use crate::{
    commands::categories::AddCategoryCommand, keyed, ApiResponse, ApiResult, AppState,
    SuccessMessage,
};
use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
}

pub async fn get_categories(State(state): State<AppState>) -> ApiResult {
    let categories = state.services.categories.list_categories().await?;
    Ok(ApiResponse::ok(
        keyed("categories", categories)?,
        SuccessMessage::GetCategoriesSuccess,
    ))
}

pub async fn add_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddCategoryRequest>,
) -> ApiResult {
    let command = AddCategoryCommand {
        name: required("name", payload.name)?,
    };
    let category = state.services.categories.add_category(command).await?;
    Ok(ApiResponse::ok(
        keyed("category", category)?,
        SuccessMessage::AddCategorySuccess,
    ))
}
