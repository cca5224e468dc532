//! Write path shared by every entity.
//!
//! A command runs inside one database transaction through four stages:
//!
//! 1. `admit`: rules that need no stored records (permission, numeric bounds)
//! 2. `resolve`: referenced records, first missing reference aborts
//! 3. `check`: business invariants against the resolved records
//! 4. `apply`: the insert/update plus the parent's child-id list append
//!
//! Any stage error rolls the transaction back, so a child is never left
//! without its parent link.

pub mod categories;
pub mod importing_requests;
pub mod products;
pub mod suppliers;
pub mod users;
pub mod work_assignments;
pub mod work_schedules;
pub mod work_shifts;

use crate::{
    db::DbPool,
    errors::{ErrorCode, ServiceError},
    metrics::{COMMANDS_APPLIED, COMMANDS_REJECTED},
};
use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, EntityTrait, PrimaryKeyTrait, TransactionTrait,
};
use slog::Logger;

/// Pipeline stage, used for log context
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Admit,
    Resolve,
    Check,
    Apply,
    Commit,
}

#[async_trait]
pub trait Command: Send + Sync {
    /// Records looked up during `resolve` and handed to `check` and `apply`
    type Refs: Send + Sync;
    /// What a successful command returns
    type Output: Send;

    /// Name used for logs and metric labels
    const NAME: &'static str;

    async fn admit(&self, _txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError>;

    async fn check(
        &self,
        txn: &DatabaseTransaction,
        refs: &Self::Refs,
    ) -> Result<(), ServiceError>;

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        refs: Self::Refs,
    ) -> Result<Self::Output, ServiceError>;
}

/// Runs a command through its stages in a single transaction
pub async fn execute<C: Command>(
    db: &DbPool,
    logger: &Logger,
    command: C,
) -> Result<C::Output, ServiceError> {
    let txn = db.begin().await?;

    match run_stages(&txn, &command).await {
        Ok(output) => {
            if let Err(e) = txn.commit().await {
                let err = ServiceError::DatabaseError(e);
                reject::<C>(logger, Stage::Commit, &err);
                return Err(err);
            }
            COMMANDS_APPLIED.with_label_values(&[C::NAME]).inc();
            slog::info!(logger, "command applied"; "command" => C::NAME);
            Ok(output)
        }
        Err((stage, err)) => {
            if let Err(e) = txn.rollback().await {
                slog::error!(logger, "rollback failed"; "command" => C::NAME, "error" => %e);
            }
            reject::<C>(logger, stage, &err);
            Err(err)
        }
    }
}

async fn run_stages<C: Command>(
    txn: &DatabaseTransaction,
    command: &C,
) -> Result<C::Output, (Stage, ServiceError)> {
    command.admit(txn).await.map_err(|e| (Stage::Admit, e))?;
    let refs = command.resolve(txn).await.map_err(|e| (Stage::Resolve, e))?;
    command
        .check(txn, &refs)
        .await
        .map_err(|e| (Stage::Check, e))?;
    command.apply(txn, refs).await.map_err(|e| (Stage::Apply, e))
}

fn reject<C: Command>(logger: &Logger, stage: Stage, err: &ServiceError) {
    let code = err
        .code()
        .unwrap_or(ErrorCode::InternalServerError)
        .to_string();
    COMMANDS_REJECTED
        .with_label_values(&[C::NAME, code.as_str()])
        .inc();

    if err.status_code().is_server_error() {
        slog::error!(logger, "command failed";
            "command" => C::NAME, "stage" => %stage, "error" => %err);
    } else {
        slog::info!(logger, "command rejected";
            "command" => C::NAME, "stage" => %stage, "code" => code);
    }
}

/// Fetches a referenced record or fails with the reference's not-found code
pub async fn find_required<E, C>(
    conn: &C,
    id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    missing: ErrorCode,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(ServiceError::NotFound(missing))
}

/// Fails with `duplicate` when the lookup found a record
pub fn ensure_absent<M>(existing: Option<M>, duplicate: ErrorCode) -> Result<(), ServiceError> {
    match existing {
        Some(_) => Err(ServiceError::BusinessRule(duplicate)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{establish_connection_with_config, run_migrations, DbConfig},
        entities::{category, empty_ids},
        logging::discard_logger,
    };
    use assert_matches::assert_matches;
    use sea_orm::{ActiveModelTrait, DbErr, Set};
    use uuid::Uuid;

    /// Inserts a child row, then fails the parent append.
    struct InsertThenFailAppend {
        id: Uuid,
    }

    #[async_trait]
    impl Command for InsertThenFailAppend {
        type Refs = ();
        type Output = ();

        const NAME: &'static str = "insert_then_fail_append";

        async fn resolve(&self, _txn: &DatabaseTransaction) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn check(&self, _txn: &DatabaseTransaction, _refs: &()) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn apply(&self, txn: &DatabaseTransaction, _refs: ()) -> Result<(), ServiceError> {
            category::ActiveModel {
                id: Set(self.id),
                name: Set("Orphan".to_string()),
                product_ids: Set(empty_ids()),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            Err(ServiceError::DatabaseError(DbErr::RecordNotUpdated))
        }
    }

    async fn setup_pool() -> DbPool {
        let pool = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            sqlx_logging: false,
            ..Default::default()
        })
        .await
        .expect("connect");
        run_migrations(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn failed_apply_rolls_back_the_child_insert() {
        let pool = setup_pool().await;
        let rejected = COMMANDS_REJECTED.with_label_values(&[
            InsertThenFailAppend::NAME,
            ErrorCode::InternalServerError.as_ref(),
        ]);
        let rejected_before = rejected.get();
        let id = Uuid::new_v4();

        let result = execute(&pool, &discard_logger(), InsertThenFailAppend { id }).await;

        assert_matches!(
            result,
            Err(ServiceError::DatabaseError(DbErr::RecordNotUpdated))
        );
        let stored = category::Entity::find_by_id(id)
            .one(&pool)
            .await
            .expect("lookup");
        assert!(stored.is_none());
        assert_eq!(rejected.get(), rejected_before + 1);
        assert_eq!(
            COMMANDS_APPLIED
                .with_label_values(&[InsertThenFailAppend::NAME])
                .get(),
            0
        );
    }

    #[test]
    fn ensure_absent_maps_a_hit_to_the_duplicate_code() {
        assert_matches!(ensure_absent::<()>(None, ErrorCode::DuplicatedCategory), Ok(()));
        assert_matches!(
            ensure_absent(Some(()), ErrorCode::DuplicatedCategory),
            Err(ServiceError::BusinessRule(ErrorCode::DuplicatedCategory))
        );
    }
}
