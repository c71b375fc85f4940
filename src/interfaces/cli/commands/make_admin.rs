//! 创建管理员账户

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::{NewUser, SeaOrmStorage};
use crate::utils::password::PasswordHasher;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 64;

/// 从不同来源获取密码
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::CommandError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim().to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::CommandError(
            "No password provided. Use --password or --stdin flag, or run interactively."
                .to_string(),
        ));
    }

    let read = |prompt: &str| -> Result<String, CliError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter password: ")?;
    let confirm = read("Confirm password: ")?;
    if password != confirm {
        return Err(CliError::CommandError("Passwords do not match".to_string()));
    }
    Ok(password)
}

/// Create a confirmed administrator
pub async fn make_admin(
    storage: &SeaOrmStorage,
    hasher: &PasswordHasher,
    username: String,
    email: String,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(CliError::ParseError(format!(
            "Password must be between {} and {} characters long",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }
    let email = email.trim().to_lowercase();

    if storage.find_user_by_email(&email).await?.is_some() {
        return Err(CliError::CommandError(format!(
            "Email already registered: {}",
            email
        )));
    }
    if storage.find_user_by_username(&username).await?.is_some() {
        return Err(CliError::CommandError(format!(
            "Username already in use: {}",
            username
        )));
    }

    let password_hash = hasher
        .hash(&password)
        .map_err(|e| CliError::CommandError(format!("Failed to hash password: {}", e)))?;
    let user = storage
        .create_user(NewUser {
            email,
            username,
            password_hash,
            confirmed: true,
            is_administrator: true,
            is_area_coordinator: false,
            ac_department_id: None,
        })
        .await?;

    println!(
        "{} Administrator {} created (id {})",
        "✓".green().bold(),
        user.username.cyan(),
        user.id
    );
    Ok(())
}
