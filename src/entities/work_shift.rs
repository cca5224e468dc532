use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_shifts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_schedule_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[sea_orm(column_type = "Json")]
    pub work_assignment_ids: Json, // Vec<Uuid> serialized
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_schedule::Entity",
        from = "Column::WorkScheduleId",
        to = "super::work_schedule::Column::Id"
    )]
    WorkSchedule,
    #[sea_orm(has_many = "super::work_assignment::Entity")]
    WorkAssignments,
}

impl Related<super::work_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkSchedule.def()
    }
}

impl Related<super::work_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkAssignments.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();
        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
