//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::{User, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// PHC-encoded Argon2 hash, stored as raw bytes
    pub password_hash: Vec<u8>,
    pub name: String,
    pub status_code: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Rows are trusted, but a status code outside the known set is corrupt data
/// and surfaces as an internal error.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status: UserStatus = model.status_code.parse().map_err(|_| {
            AppError::internal(format!(
                "user {} has unknown status code {:?}",
                model.id, model.status_code
            ))
        })?;

        Ok(User::reconstruct(
            model.id,
            model.email,
            model.password_hash,
            model.name,
            status,
            model.created_at,
        ))
    }
}

/// Convert domain entity to an insertable model
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id()),
            email: Set(user.email().to_string()),
            password_hash: Set(user.password_hash().to_vec()),
            name: Set(user.name().to_string()),
            status_code: Set(user.status().as_str().to_string()),
            created_at: Set(user.created_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn model(status_code: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: b"$argon2id$stub".to_vec(),
            name: "Test".to_string(),
            status_code: status_code.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_model_to_user() {
        let row = model("FROZEN");
        let user = User::try_from(row.clone()).unwrap();

        assert_eq!(user.id(), row.id);
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password_hash(), row.password_hash.as_slice());
        assert_eq!(user.status(), UserStatus::Frozen);
        assert_eq!(user.created_at(), row.created_at);
    }

    #[test]
    fn test_unknown_status_code_is_internal() {
        let err = User::try_from(model("SUSPENDED")).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_user_to_active_model() {
        let user = User::try_from(model("ACTIVE")).unwrap();
        let active = ActiveModel::from(&user);

        assert_eq!(active.id, Set(user.id()));
        assert_eq!(active.status_code, Set("ACTIVE".to_string()));
        assert_eq!(active.password_hash, Set(user.password_hash().to_vec()));
    }
}
