//! Departments and their units

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::SeaOrmStorage;
use crate::errors::{OversightError, Result};

use migration::entities::{department, unit};

impl SeaOrmStorage {
    pub async fn list_departments(&self) -> Result<Vec<department::Model>> {
        Ok(department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn get_department(&self, id: i32) -> Result<Option<department::Model>> {
        Ok(department::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_department_by_name(&self, name: &str) -> Result<Option<department::Model>> {
        Ok(department::Entity::find()
            .filter(department::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn create_department(
        &self,
        name: &str,
        short_name: &str,
    ) -> Result<department::Model> {
        if self.find_department_by_name(name).await?.is_some() {
            return Err(OversightError::validation(format!(
                "Department {} already exists",
                name
            )));
        }

        let model = department::ActiveModel {
            name: Set(name.to_string()),
            short_name: Set(short_name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Department created: {} ({})", model.name, model.id);
        Ok(model)
    }

    /// Units of one department, or of all departments
    pub async fn list_units(&self, department_id: Option<i32>) -> Result<Vec<unit::Model>> {
        let mut query = unit::Entity::find();
        if let Some(dept) = department_id {
            query = query.filter(unit::Column::DepartmentId.eq(dept));
        }
        Ok(query
            .order_by_asc(unit::Column::Descrip)
            .all(&self.db)
            .await?)
    }

    pub async fn get_unit(&self, id: i32) -> Result<Option<unit::Model>> {
        Ok(unit::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create_unit(&self, descrip: &str, department_id: i32) -> Result<unit::Model> {
        let model = unit::ActiveModel {
            descrip: Set(descrip.to_string()),
            department_id: Set(department_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Unit created: {} (department {})",
            model.descrip, model.department_id
        );
        Ok(model)
    }
}
