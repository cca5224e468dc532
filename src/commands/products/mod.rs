pub mod add_product_command;
pub mod update_product_command;

use crate::errors::{ErrorCode, ServiceError};
use rust_decimal::Decimal;

pub use add_product_command::AddProductCommand;
pub use update_product_command::UpdateProductCommand;

pub fn ensure_valid_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity < 0 {
        return Err(ServiceError::BusinessRule(
            ErrorCode::InvalidProductAvailableQuantity,
        ));
    }
    Ok(())
}

pub fn ensure_valid_price(price: Decimal) -> Result<(), ServiceError> {
    if price < Decimal::ZERO {
        return Err(ServiceError::BusinessRule(ErrorCode::InvalidProductPrice));
    }
    Ok(())
}
