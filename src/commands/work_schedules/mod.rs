pub mod add_work_schedule_command;

use crate::errors::{ErrorCode, ServiceError};

pub use add_work_schedule_command::AddWorkScheduleCommand;

/// Schedules cannot be created for periods before this year
pub const MIN_WORK_YEAR: i32 = 2020;

/// Month must be a calendar month, year no earlier than `MIN_WORK_YEAR`.
/// Month is checked first.
pub fn ensure_valid_period(month: i32, year: i32) -> Result<(), ServiceError> {
    if !(1..=12).contains(&month) {
        return Err(ServiceError::BusinessRule(ErrorCode::InvalidWorkMonth));
    }
    if year < MIN_WORK_YEAR {
        return Err(ServiceError::BusinessRule(ErrorCode::InvalidWorkYear));
    }
    Ok(())
}
