use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Staff => UserRole::Staff,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Staff => user::UserRole::Staff,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        full_name: model.full_name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let email = new_user.email.clone();

        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            full_name: Set(new_user.full_name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(domain_role_to_entity(new_user.role)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("duplicate") {
                DomainError::Conflict(format!("Email already registered: {}", email))
            } else {
                db_err(e)
            }
        })?;

        info!("User created: {} ({})", result.email, result.id);
        Ok(user_model_to_domain(result))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };

        let now = Utc::now();
        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_db;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: "Front Desk".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
            role: UserRole::Staff,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        repo.create(new_user("desk@freshpress.com")).await.unwrap();
        let err = repo.create(new_user("desk@freshpress.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn record_login_sets_timestamp() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let user = repo.create(new_user("desk@freshpress.com")).await.unwrap();
        assert!(user.last_login_at.is_none());

        repo.record_login(&user.id).await.unwrap();
        let reloaded = repo
            .find_by_email("desk@freshpress.com")
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.last_login_at.is_some());
        assert_eq!(reloaded.role, UserRole::Staff);
    }
}
