use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub filepath: String,
    pub hash_img: String,
    pub date_image_inserted: DateTimeUtc,
    pub date_image_taken: Option<DateTimeUtc>,
    /// None until a user has sorted the image
    pub contains_cops: Option<bool>,
    /// User who sorted the image
    pub user_id: Option<i32>,
    #[sea_orm(default_value = false)]
    pub is_tagged: bool,
    pub department_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
