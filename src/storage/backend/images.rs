//! Uploaded images and the face tags placed on them

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};

use super::SeaOrmStorage;
use crate::errors::{OversightError, Result};
use crate::storage::models::{NewFace, NewImage};

use migration::entities::{face, image};

impl SeaOrmStorage {
    pub async fn get_image(&self, id: i32) -> Result<Option<image::Model>> {
        Ok(image::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// 插入图片；同一部门内相同哈希的图片直接返回已有记录
    ///
    /// Returns the row and whether it was newly inserted.
    pub async fn create_image(&self, new: NewImage) -> Result<(image::Model, bool)> {
        if let Some(existing) = image::Entity::find()
            .filter(image::Column::HashImg.eq(new.hash_img.as_str()))
            .filter(image::Column::DepartmentId.eq(new.department_id))
            .one(&self.db)
            .await?
        {
            debug!("Duplicate image upload, reusing image {}", existing.id);
            return Ok((existing, false));
        }

        let model = image::ActiveModel {
            filepath: Set(new.filepath),
            hash_img: Set(new.hash_img),
            date_image_inserted: Set(Utc::now()),
            date_image_taken: Set(new.date_image_taken),
            contains_cops: Set(None),
            user_id: Set(new.user_id),
            is_tagged: Set(false),
            department_id: Set(new.department_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Image {} stored for department {}",
            model.id, model.department_id
        );
        Ok((model, true))
    }

    /// Oldest image of the department nobody has sorted yet
    pub async fn next_unsorted_image(&self, department_id: i32) -> Result<Option<image::Model>> {
        Ok(image::Entity::find()
            .filter(image::Column::DepartmentId.eq(department_id))
            .filter(image::Column::ContainsCops.is_null())
            .order_by_asc(image::Column::Id)
            .one(&self.db)
            .await?)
    }

    /// Oldest image known to show officers that is not fully tagged
    pub async fn next_untagged_image(
        &self,
        department_id: Option<i32>,
    ) -> Result<Option<image::Model>> {
        let mut query = image::Entity::find()
            .filter(image::Column::ContainsCops.eq(true))
            .filter(image::Column::IsTagged.eq(false));
        if let Some(dept) = department_id {
            query = query.filter(image::Column::DepartmentId.eq(dept));
        }
        Ok(query
            .order_by_asc(image::Column::Id)
            .one(&self.db)
            .await?)
    }

    pub async fn classify_image(
        &self,
        id: i32,
        contains_cops: bool,
        user_id: i32,
    ) -> Result<image::Model> {
        let existing = self
            .get_image(id)
            .await?
            .ok_or_else(|| OversightError::not_found(format!("Image {} not found", id)))?;

        let mut active: image::ActiveModel = existing.into();
        active.contains_cops = Set(Some(contains_cops));
        active.user_id = Set(Some(user_id));
        let model = active.update(&self.db).await?;

        info!(
            "Image {} classified by user {}: contains_cops={}",
            id, user_id, contains_cops
        );
        Ok(model)
    }

    pub async fn mark_image_tagged(&self, id: i32) -> Result<image::Model> {
        let existing = self
            .get_image(id)
            .await?
            .ok_or_else(|| OversightError::not_found(format!("Image {} not found", id)))?;

        if existing.is_tagged {
            return Ok(existing);
        }

        let mut active: image::ActiveModel = existing.into();
        active.is_tagged = Set(true);
        Ok(active.update(&self.db).await?)
    }

    pub async fn get_face(&self, id: i32) -> Result<Option<face::Model>> {
        Ok(face::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn faces_for_officer(&self, officer_id: i32) -> Result<Vec<face::Model>> {
        Ok(face::Entity::find()
            .filter(face::Column::OfficerId.eq(officer_id))
            .order_by_asc(face::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn faces_for_image(&self, img_id: i32) -> Result<Vec<face::Model>> {
        Ok(face::Entity::find()
            .filter(face::Column::ImgId.eq(img_id))
            .order_by_asc(face::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_face(&self, officer_id: i32, img_id: i32) -> Result<Option<face::Model>> {
        Ok(face::Entity::find()
            .filter(face::Column::OfficerId.eq(officer_id))
            .filter(face::Column::ImgId.eq(img_id))
            .one(&self.db)
            .await?)
    }

    pub async fn create_face(&self, new: NewFace) -> Result<face::Model> {
        let model = face::ActiveModel {
            officer_id: Set(new.officer_id),
            img_id: Set(new.img_id),
            original_image_id: Set(new.original_image_id),
            face_position_x: Set(new.face_position_x),
            face_position_y: Set(new.face_position_y),
            face_width: Set(new.face_width),
            face_height: Set(new.face_height),
            user_id: Set(new.user_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Tag {} added: officer {} on image {}",
            model.id, model.officer_id, model.img_id
        );
        Ok(model)
    }

    pub async fn delete_face(&self, id: i32) -> Result<()> {
        let result = face::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(OversightError::not_found(format!("Tag {} not found", id)));
        }

        info!("Tag deleted: {}", id);
        Ok(())
    }
}
