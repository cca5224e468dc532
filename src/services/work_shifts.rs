use crate::{
    commands::{execute, work_shifts::AddWorkShiftCommand},
    db::DbPool,
    entities::{
        work_assignment::{self, Entity as WorkAssignment},
        work_schedule::{self, Entity as WorkSchedule},
        work_shift::{self, Entity as WorkShift},
    },
    errors::ServiceError,
    services::find_in_chunks,
};
use chrono::{DateTime, Utc};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use slog::Logger;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;
use uuid::Uuid;

/// Shift with its assignments and parent schedule expanded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkShiftDetail {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub work_schedule: Option<work_schedule::Summary>,
    pub work_assignments: Vec<work_assignment::Summary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct WorkShiftService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl WorkShiftService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn add_work_shift(
        &self,
        command: AddWorkShiftCommand,
    ) -> Result<work_shift::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    pub async fn list_work_shifts(&self) -> Result<Vec<WorkShiftDetail>, ServiceError> {
        let db = &*self.db_pool;
        let rows = WorkShift::find()
            .find_also_related(WorkSchedule)
            .order_by_asc(work_shift::Column::StartTime)
            .all(db)
            .await?;

        let mut assignments: HashMap<Uuid, Vec<work_assignment::Summary>> = HashMap::new();
        let mut loaded = find_in_chunks::<WorkAssignment, _, _>(
            db,
            work_assignment::Column::WorkShiftId,
            rows.iter().map(|(s, _)| s.id),
        )
        .await?;
        loaded.sort_by_key(|a| a.created_at);
        for assignment in loaded {
            assignments
                .entry(assignment.work_shift_id)
                .or_default()
                .push(assignment.into());
        }

        Ok(rows
            .into_iter()
            .map(|(s, schedule)| WorkShiftDetail {
                work_schedule: schedule.map(work_schedule::Summary::from),
                work_assignments: assignments.remove(&s.id).unwrap_or_default(),
                id: s.id,
                start_time: s.start_time,
                end_time: s.end_time,
                created_at: s.created_at,
                updated_at: s.updated_at,
            })
            .collect())
    }
}
