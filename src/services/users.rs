use crate::{
    commands::{execute, users::CreateUserCommand},
    db::DbPool,
    entities::user::{self, Entity as User, UserRole},
    errors::ServiceError,
};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Permission lookup: true when the stored profile of `actor_id` carries `role`.
/// An unknown actor has no permissions.
pub async fn check_user_permission<C>(
    conn: &C,
    actor_id: Uuid,
    role: UserRole,
) -> Result<bool, ServiceError>
where
    C: ConnectionTrait,
{
    let actor = User::find_by_id(actor_id).one(conn).await?;
    Ok(actor.map(|u| u.role == role).unwrap_or(false))
}

/// Service for actor profiles
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    logger: Logger,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self { db_pool, logger }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, command: CreateUserCommand) -> Result<user::Model, ServiceError> {
        execute(&self.db_pool, &self.logger, command).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        Ok(User::find_by_id(id).one(&*self.db_pool).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(User::find()
            .order_by_asc(user::Column::Email)
            .all(&*self.db_pool)
            .await?)
    }
}
