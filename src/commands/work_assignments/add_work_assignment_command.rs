use crate::{
    commands::{ensure_absent, find_required, Command},
    entities::{
        append_id, user,
        work_assignment::{self, Entity as WorkAssignment},
        work_shift,
    },
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use uuid::Uuid;

/// Assigns the calling actor to a shift
#[derive(Debug, Clone, Copy)]
pub struct AddWorkAssignmentCommand {
    pub work_shift_id: Uuid,
    pub assigner_id: Uuid,
}

pub struct AssignmentRefs {
    pub shift: work_shift::Model,
    pub assigner: user::Model,
}

#[async_trait]
impl Command for AddWorkAssignmentCommand {
    type Refs = AssignmentRefs;
    type Output = work_assignment::Model;

    const NAME: &'static str = "add_work_assignment";

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        let shift = find_required::<work_shift::Entity, _>(
            txn,
            self.work_shift_id,
            ErrorCode::WorkShiftNotFound,
        )
        .await?;
        let assigner =
            find_required::<user::Entity, _>(txn, self.assigner_id, ErrorCode::UserNotFound)
                .await?;
        Ok(AssignmentRefs { shift, assigner })
    }

    async fn check(
        &self,
        txn: &DatabaseTransaction,
        refs: &Self::Refs,
    ) -> Result<(), ServiceError> {
        let existing = WorkAssignment::find()
            .filter(work_assignment::Column::WorkShiftId.eq(refs.shift.id))
            .filter(work_assignment::Column::AssignerId.eq(refs.assigner.id))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedWorkAssignment)
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        refs: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let created = work_assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_shift_id: Set(refs.shift.id),
            assigner_id: Set(refs.assigner.id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedWorkAssignment))?;

        let assignment_ids = append_id(&refs.shift.work_assignment_ids, created.id);
        let mut shift = refs.shift.into_active_model();
        shift.work_assignment_ids = Set(assignment_ids);
        shift.update(txn).await?;

        Ok(created)
    }
}
