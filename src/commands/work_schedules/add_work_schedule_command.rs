use super::ensure_valid_period;
use crate::{
    commands::{ensure_absent, Command},
    entities::{
        empty_ids,
        work_schedule::{self, Entity as WorkSchedule},
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct AddWorkScheduleCommand {
    pub month: i32,
    pub year: i32,
}

#[async_trait]
impl Command for AddWorkScheduleCommand {
    type Refs = ();
    type Output = work_schedule::Model;

    const NAME: &'static str = "add_work_schedule";

    async fn admit(&self, _txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        ensure_valid_period(self.month, self.year)
    }

    async fn resolve(&self, _txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        Ok(())
    }

    async fn check(&self, txn: &DatabaseTransaction, _refs: &()) -> Result<(), ServiceError> {
        let existing = WorkSchedule::find()
            .filter(work_schedule::Column::Month.eq(self.month))
            .filter(work_schedule::Column::Year.eq(self.year))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedWorkSchedule)
    }

    async fn apply(&self, txn: &DatabaseTransaction, _refs: ()) -> Result<Self::Output, ServiceError> {
        work_schedule::ActiveModel {
            id: Set(Uuid::new_v4()),
            month: Set(self.month),
            year: Set(self.year),
            work_shift_ids: Set(empty_ids()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedWorkSchedule))
    }
}
