use super::ensure_shift_within_schedule;
use crate::{
    commands::{ensure_absent, find_required, Command},
    entities::{
        append_id, empty_ids, work_schedule,
        work_shift::{self, Entity as WorkShift},
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddWorkShiftCommand {
    pub work_schedule_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[async_trait]
impl Command for AddWorkShiftCommand {
    type Refs = work_schedule::Model;
    type Output = work_shift::Model;

    const NAME: &'static str = "add_work_shift";

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        find_required::<work_schedule::Entity, _>(
            txn,
            self.work_schedule_id,
            ErrorCode::WorkScheduleNotFound,
        )
        .await
    }

    async fn check(
        &self,
        txn: &DatabaseTransaction,
        schedule: &Self::Refs,
    ) -> Result<(), ServiceError> {
        ensure_shift_within_schedule(self.start_time, self.end_time, schedule.month, schedule.year)?;

        let existing = WorkShift::find()
            .filter(work_shift::Column::WorkScheduleId.eq(schedule.id))
            .filter(work_shift::Column::StartTime.eq(self.start_time))
            .filter(work_shift::Column::EndTime.eq(self.end_time))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedWorkShift)
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        schedule: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let created = work_shift::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_schedule_id: Set(schedule.id),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            work_assignment_ids: Set(empty_ids()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedWorkShift))?;

        let work_shift_ids = append_id(&schedule.work_shift_ids, created.id);
        let mut schedule = schedule.into_active_model();
        schedule.work_shift_ids = Set(work_shift_ids);
        schedule.update(txn).await?;

        Ok(created)
    }
}
