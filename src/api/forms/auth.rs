//! Account forms

use serde::Deserialize;

use super::FormErrors;
use super::validators::{checkbox, is_email, is_username, present};

const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

fn email_field(errors: &mut FormErrors, value: &Option<String>) -> Option<String> {
    let email = errors.required("email", value)?;
    errors.length("email", email, 1, 64);
    if !is_email(email) {
        errors.add("email", "Invalid email address.");
    }
    Some(email.to_string())
}

/// Require `password` and that `password2` repeats it
fn new_password(
    errors: &mut FormErrors,
    password: &Option<String>,
    password2: &Option<String>,
) -> Option<String> {
    let first = errors.required("password", password);
    let second = errors.required("password2", password2);
    if let (Some(a), Some(b)) = (first, second)
        && a != b
    {
        errors.add("password", PASSWORDS_MUST_MATCH);
    }
    first.map(str::to_string)
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub remember_me: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Login, FormErrors> {
        let mut errors = FormErrors::new();
        let email = email_field(&mut errors, &self.email);
        let password = errors.required("password", &self.password);
        match (email, password) {
            (Some(email), Some(password)) => errors.finish(Login {
                email,
                password: password.to_string(),
                remember: checkbox(&self.remember_me),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegistrationForm {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegistrationForm {
    /// Shape checks only; uniqueness is checked against storage by the handler
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::new();
        let email = email_field(&mut errors, &self.email);

        let username = errors.required("username", &self.username);
        if let Some(name) = username {
            errors.length("username", name, 1, 64);
            if !is_username(name) {
                errors.add(
                    "username",
                    "Usernames must have only letters, numbers, dots or underscores",
                );
            }
        }

        let password = new_password(&mut errors, &self.password, &self.password2);
        if let Some(password) = &password {
            errors.length("password", password, 8, 64);
        }

        match (email, username, password) {
            (Some(email), Some(username), Some(password)) => errors.finish(Registration {
                email,
                username: username.to_string(),
                password,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<PasswordChange, FormErrors> {
        let mut errors = FormErrors::new();
        let old = errors.required("old_password", &self.old_password);
        let password = new_password(&mut errors, &self.password, &self.password2);
        match (old, password) {
            (Some(old), Some(password)) => errors.finish(PasswordChange {
                old_password: old.to_string(),
                password,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PasswordResetRequestForm {
    pub email: Option<String>,
}

impl PasswordResetRequestForm {
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        match email_field(&mut errors, &self.email) {
            Some(email) => errors.finish(email),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PasswordResetForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub password: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<PasswordReset, FormErrors> {
        let mut errors = FormErrors::new();
        let email = email_field(&mut errors, &self.email);
        let password = new_password(&mut errors, &self.password, &self.password2);
        match (email, password) {
            (Some(email), Some(password)) => errors.finish(PasswordReset { email, password }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChangeEmailForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmailChange {
    pub email: String,
    pub password: String,
}

impl ChangeEmailForm {
    pub fn validate(&self) -> Result<EmailChange, FormErrors> {
        let mut errors = FormErrors::new();
        let email = email_field(&mut errors, &self.email);
        let password = errors.required("password", &self.password);
        match (email, password) {
            (Some(email), Some(password)) => errors.finish(EmailChange {
                email,
                password: password.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChangeDefaultDepartmentForm {
    pub dept_pref: Option<String>,
}

impl ChangeDefaultDepartmentForm {
    /// Blank clears the preference
    pub fn validate(&self) -> Result<Option<i32>, FormErrors> {
        let mut errors = FormErrors::new();
        let dept = errors.optional_int("dept_pref", &self.dept_pref);
        errors.finish(dept)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EditUserForm {
    pub is_area_coordinator: Option<String>,
    pub ac_department: Option<String>,
    pub is_administrator: Option<String>,
    pub is_disabled: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoles {
    pub is_area_coordinator: bool,
    pub ac_department_id: Option<i32>,
    pub is_administrator: bool,
    pub is_disabled: bool,
}

impl EditUserForm {
    pub fn validate(&self) -> Result<UserRoles, FormErrors> {
        let mut errors = FormErrors::new();
        let is_area_coordinator = checkbox(&self.is_area_coordinator);
        let ac_department_id = errors.optional_int("ac_department", &self.ac_department);
        if is_area_coordinator && present(&self.ac_department).is_none() {
            errors.add(
                "is_area_coordinator",
                "Area coordinators must have a department",
            );
        }
        errors.finish(UserRoles {
            is_area_coordinator,
            ac_department_id,
            is_administrator: checkbox(&self.is_administrator),
            is_disabled: checkbox(&self.is_disabled),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_login_remember_me() {
        let form = LoginForm {
            email: s("jen@example.org"),
            password: s("dog"),
            remember_me: s("y"),
            next: None,
        };
        let login = form.validate().unwrap();
        assert!(login.remember);
        assert_eq!(login.email, "jen@example.org");
    }

    #[test]
    fn test_login_requires_password() {
        let form = LoginForm {
            email: s("jen@example.org"),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("password"));
    }

    #[test]
    fn test_registration_collects_every_error() {
        let form = RegistrationForm {
            email: s("not-an-email"),
            username: s("9lives"),
            password: s("dog"),
            password2: s("cat"),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field("email").contains(&"Invalid email address.".to_string()));
        assert!(!errors.field("username").is_empty());
        assert!(errors.field("password").contains(&PASSWORDS_MUST_MATCH.to_string()));
        assert_eq!(errors.field("password").len(), 2);
    }

    #[test]
    fn test_registration_valid() {
        let form = RegistrationForm {
            email: s("jen2@example.org"),
            username: s("redshiftzero2"),
            password: s("dogdogdogdog"),
            password2: s("dogdogdogdog"),
        };
        let reg = form.validate().unwrap();
        assert_eq!(reg.username, "redshiftzero2");
    }

    #[test]
    fn test_reset_has_no_length_rule() {
        let form = PasswordResetForm {
            email: s("jen@example.org"),
            password: s("catdog"),
            password2: s("catdog"),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_edit_user_needs_department_for_ac() {
        let form = EditUserForm {
            is_area_coordinator: s("y"),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.field("is_area_coordinator"),
            ["Area coordinators must have a department".to_string()]
        );

        let form = EditUserForm {
            is_area_coordinator: s("y"),
            ac_department: s("1"),
            ..Default::default()
        };
        let roles = form.validate().unwrap();
        assert_eq!(roles.ac_department_id, Some(1));
        assert!(!roles.is_administrator);
    }

    #[test]
    fn test_default_department_blank_clears() {
        let form = ChangeDefaultDepartmentForm { dept_pref: s("") };
        assert_eq!(form.validate().unwrap(), None);
        let form = ChangeDefaultDepartmentForm { dept_pref: s("2") };
        assert_eq!(form.validate().unwrap(), Some(2));
    }
}
