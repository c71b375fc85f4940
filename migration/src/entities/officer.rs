use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "officers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub middle_initial: String,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub employment_date: Option<Date>,
    pub birth_year: Option<i32>,
    pub department_id: i32,
    pub unique_internal_identifier: Option<String>,
}

impl Model {
    /// "First M. Last", skipping an empty middle initial
    pub fn full_name(&self) -> String {
        if self.middle_initial.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            format!(
                "{} {}. {}",
                self.first_name, self.middle_initial, self.last_name
            )
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
