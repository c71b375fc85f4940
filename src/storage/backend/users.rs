//! User accounts

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::SeaOrmStorage;
use crate::errors::{OversightError, Result};
use crate::storage::models::{NewUser, UserUpdate};

use migration::entities::user;

impl SeaOrmStorage {
    pub async fn get_user(&self, id: i32) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// 邮箱统一以小写存储，查找时同样转小写
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await?)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_user(&self, new: NewUser) -> Result<user::Model> {
        let model = user::ActiveModel {
            email: Set(new.email.trim().to_lowercase()),
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            confirmed: Set(new.confirmed),
            is_area_coordinator: Set(new.is_area_coordinator),
            ac_department_id: Set(new.ac_department_id),
            is_administrator: Set(new.is_administrator),
            is_disabled: Set(false),
            dept_pref: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("User created: {} ({})", model.username, model.id);
        Ok(model)
    }

    pub async fn update_user(&self, id: i32, update: UserUpdate) -> Result<user::Model> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| OversightError::not_found(format!("User {} not found", id)))?;

        let mut active: user::ActiveModel = existing.clone().into();
        if let Some(v) = update.email {
            active.email = Set(v.trim().to_lowercase());
        }
        if let Some(v) = update.password_hash {
            active.password_hash = Set(v);
        }
        if let Some(v) = update.confirmed {
            active.confirmed = Set(v);
        }
        if let Some(v) = update.is_area_coordinator {
            active.is_area_coordinator = Set(v);
        }
        if let Some(v) = update.ac_department_id {
            active.ac_department_id = Set(v);
        }
        if let Some(v) = update.is_administrator {
            active.is_administrator = Set(v);
        }
        if let Some(v) = update.is_disabled {
            active.is_disabled = Set(v);
        }
        if let Some(v) = update.dept_pref {
            active.dept_pref = Set(v);
        }

        if !active.is_changed() {
            return Ok(existing);
        }

        let model = active.update(&self.db).await?;
        info!("User updated: {} ({})", model.username, model.id);
        Ok(model)
    }
}
