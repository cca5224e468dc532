use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};

/// Role carried by an actor's token and stored on the profile
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "cashier")]
    Cashier,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "importer")]
    Importer,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub fullname: String,
    #[sea_orm(nullable)]
    pub avatar: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_assignment::Entity")]
    WorkAssignments,
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

/// What other actors may see of a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub fullname: String,
    pub avatar: Option<String>,
    pub role: UserRole,
}

impl From<Model> for PublicProfile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            fullname: model.fullname,
            avatar: model.avatar,
            role: model.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_renders_lowercase() {
        assert_eq!(UserRole::Importer.to_string(), "importer");
        assert_eq!(UserRole::from_str("cashier").unwrap(), UserRole::Cashier);
        assert_eq!(
            serde_json::to_value(UserRole::Manager).unwrap(),
            serde_json::json!("manager")
        );
    }
}
