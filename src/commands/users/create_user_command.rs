use crate::{
    commands::{ensure_absent, Command},
    entities::user::{self, Entity as User, UserRole},
    errors::{ErrorCode, ServiceError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Registers an actor profile so tokens minted for it resolve to a stored role
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub email: String,
    pub fullname: String,
    pub avatar: Option<String>,
    pub role: UserRole,
}

#[async_trait]
impl Command for CreateUserCommand {
    type Refs = ();
    type Output = user::Model;

    const NAME: &'static str = "create_user";

    async fn resolve(&self, _txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        Ok(())
    }

    async fn check(&self, txn: &DatabaseTransaction, _refs: &()) -> Result<(), ServiceError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(self.email.as_str()))
            .one(txn)
            .await?;
        ensure_absent(existing, ErrorCode::DuplicatedUser)
    }

    async fn apply(&self, txn: &DatabaseTransaction, _refs: ()) -> Result<Self::Output, ServiceError> {
        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(self.email.clone()),
            fullname: Set(self.fullname.clone()),
            avatar: Set(self.avatar.clone()),
            role: Set(self.role),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| ServiceError::from_write(e, ErrorCode::DuplicatedUser))
    }
}
