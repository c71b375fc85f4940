//! A face tag: the link between an officer and an image they appear in

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "faces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub officer_id: i32,
    pub img_id: i32,
    pub original_image_id: Option<i32>,
    pub face_position_x: i32,
    pub face_position_y: i32,
    pub face_width: i32,
    pub face_height: i32,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
