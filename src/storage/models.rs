//! Storage input types
//!
//! Entities themselves live in `migration::entities`; these structs describe
//! what callers hand to the storage layer when creating or changing rows.

use chrono::{DateTime, NaiveDate, Utc};

/// 警员列表过滤条件
#[derive(Default, Clone, Debug)]
pub struct OfficerFilter {
    pub department_id: Option<i32>,
    /// Case-insensitive substring of the last name
    pub name: Option<String>,
    /// Substring of any assignment badge number
    pub badge: Option<String>,
    pub rank: Option<String>,
    pub unit_id: Option<i32>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl OfficerFilter {
    /// Filters that need a lookup in the assignments table
    pub(crate) fn has_assignment_filter(&self) -> bool {
        self.badge.is_some() || self.rank.is_some() || self.unit_id.is_some()
    }
}

/// New officer together with the first assignment
#[derive(Clone, Debug)]
pub struct NewOfficer {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub employment_date: Option<NaiveDate>,
    pub birth_year: Option<i32>,
    pub department_id: i32,
    pub unique_internal_identifier: Option<String>,
    pub star_no: Option<String>,
    pub rank: Option<String>,
    pub unit_id: Option<i32>,
}

/// Partial officer update, `None` keeps the stored value
#[derive(Default, Clone, Debug)]
pub struct OfficerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_initial: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub employment_date: Option<NaiveDate>,
    pub birth_year: Option<i32>,
    pub department_id: Option<i32>,
    pub unique_internal_identifier: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewAssignment {
    pub officer_id: i32,
    pub star_no: Option<String>,
    pub rank: Option<String>,
    pub unit_id: Option<i32>,
    pub star_date: Option<NaiveDate>,
}

/// Partial assignment update, `None` keeps the stored value
#[derive(Default, Clone, Debug)]
pub struct AssignmentUpdate {
    pub star_no: Option<String>,
    pub rank: Option<String>,
    pub unit_id: Option<i32>,
    pub star_date: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct NewImage {
    pub filepath: String,
    pub hash_img: String,
    pub department_id: i32,
    pub user_id: Option<i32>,
    pub date_image_taken: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct NewFace {
    pub officer_id: i32,
    pub img_id: i32,
    pub original_image_id: Option<i32>,
    pub face_position_x: i32,
    pub face_position_y: i32,
    pub face_width: i32,
    pub face_height: i32,
    pub user_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub confirmed: bool,
    pub is_administrator: bool,
    pub is_area_coordinator: bool,
    pub ac_department_id: Option<i32>,
}

/// Partial user update, `None` keeps the stored value.
/// The nested options clear a column with `Some(None)`.
#[derive(Default, Clone, Debug)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub confirmed: Option<bool>,
    pub is_area_coordinator: Option<bool>,
    pub ac_department_id: Option<Option<i32>>,
    pub is_administrator: Option<bool>,
    pub is_disabled: Option<bool>,
    pub dept_pref: Option<Option<i32>>,
}
