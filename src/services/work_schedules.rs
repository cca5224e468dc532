use crate::{
    commands::{execute, work_schedules::AddWorkScheduleCommand},
    db::DbPool,
    entities::{
        user::{self, PublicProfile},
        work_assignment::{self, Entity as WorkAssignment},
        work_schedule::{self, Entity as WorkSchedule},
        work_shift::{self, Entity as WorkShift},
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use sea_orm::{EntityTrait, ModelTrait, QueryOrder};
use serde::Serialize;
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Schedule tree: schedule -> shifts -> assignments -> assigner profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkScheduleView {
    pub id: Uuid,
    pub month: i32,
    pub year: i32,
    pub work_shifts: Vec<WorkShiftView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkShiftView {
    pub id: Uuid,
    pub work_schedule_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub work_assignments: Vec<WorkAssignmentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Assignment with the assigner expanded and no back-reference to its shift
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkAssignmentView {
    pub id: Uuid,
    pub assigner: Option<PublicProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service for managing work schedules
#[derive(Clone)]
pub struct WorkScheduleService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl WorkScheduleService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_work_schedule(
        &self,
        command: AddWorkScheduleCommand,
    ) -> Result<work_schedule::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    /// Expands every schedule concurrently, and every shift of a schedule
    /// concurrently. Any failed branch fails the whole read.
    #[instrument(skip(self))]
    pub async fn list_work_schedules(&self) -> Result<Vec<WorkScheduleView>, ServiceError> {
        let schedules = WorkSchedule::find()
            .order_by_desc(work_schedule::Column::Year)
            .order_by_desc(work_schedule::Column::Month)
            .all(&*self.db_pool)
            .await?;

        let views = try_join_all(schedules.into_iter().map(|s| self.expand_schedule(s))).await;
        if let Err(e) = &views {
            slog::error!(self.logger, "schedule tree expansion failed"; "error" => %e);
        }
        views
    }

    async fn expand_schedule(
        &self,
        schedule: work_schedule::Model,
    ) -> Result<WorkScheduleView, ServiceError> {
        let shifts = schedule
            .find_related(WorkShift)
            .order_by_asc(work_shift::Column::StartTime)
            .all(&*self.db_pool)
            .await?;

        let work_shifts = try_join_all(shifts.into_iter().map(|s| self.expand_shift(s))).await?;

        Ok(WorkScheduleView {
            id: schedule.id,
            month: schedule.month,
            year: schedule.year,
            work_shifts,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        })
    }

    async fn expand_shift(&self, shift: work_shift::Model) -> Result<WorkShiftView, ServiceError> {
        let assignments = shift
            .find_related(WorkAssignment)
            .find_also_related(user::Entity)
            .order_by_asc(work_assignment::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;

        let work_assignments = assignments
            .into_iter()
            .map(|(assignment, assigner)| WorkAssignmentView {
                id: assignment.id,
                assigner: assigner.map(PublicProfile::from),
                created_at: assignment.created_at,
                updated_at: assignment.updated_at,
            })
            .collect();

        Ok(WorkShiftView {
            id: shift.id,
            work_schedule_id: shift.work_schedule_id,
            start_time: shift.start_time,
            end_time: shift.end_time,
            work_assignments,
            created_at: shift.created_at,
            updated_at: shift.updated_at,
        })
    }
}
