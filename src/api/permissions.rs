//! Role checks
//!
//! Administrators manage everything. Area coordinators manage the officers,
//! assignments, units and tags of their own department.

use crate::errors::{OversightError, Result};

use migration::entities::user;

pub fn is_administrator(user: &user::Model) -> bool {
    user.is_administrator
}

pub fn is_area_coordinator(user: &user::Model) -> bool {
    user.is_area_coordinator && user.ac_department_id.is_some()
}

pub fn can_manage_department(user: &user::Model, department_id: i32) -> bool {
    user.is_administrator
        || (user.is_area_coordinator && user.ac_department_id == Some(department_id))
}

pub fn require_admin(user: &user::Model) -> Result<()> {
    if is_administrator(user) {
        Ok(())
    } else {
        Err(OversightError::forbidden("Administrator rights required"))
    }
}

pub fn require_ac_or_admin(user: &user::Model) -> Result<()> {
    if is_administrator(user) || is_area_coordinator(user) {
        Ok(())
    } else {
        Err(OversightError::forbidden(
            "Area coordinator or administrator rights required",
        ))
    }
}

pub fn require_department(user: &user::Model, department_id: i32) -> Result<()> {
    if can_manage_department(user, department_id) {
        Ok(())
    } else {
        Err(OversightError::forbidden(
            "You cannot manage records of this department",
        ))
    }
}
