//! 邮件发送
//!
//! 账户相关邮件（确认、重置密码、修改邮箱）都经由 [`Mailer`] 发出。
//! 默认实现只写日志；测试使用 [`MemoryMailer`] 检查内容。

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use crate::config::MailConfig;
use crate::errors::Result;

/// 一封待发送的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 邮件发送 trait
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<()>;

    /// 获取实现名称（用于日志）
    fn name(&self) -> &'static str;
}

/// Writes every message to the log instead of delivering it
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<()> {
        info!(
            from = %self.sender,
            to = %email.to,
            subject = %email.subject,
            "Outgoing mail:\n{}",
            email.body
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Keeps sent messages in memory
#[derive(Default, Clone)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<Email>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Email> {
        self.outbox.lock().clone()
    }

    pub fn last_to(&self, to: &str) -> Option<Email> {
        self.outbox.lock().iter().rev().find(|m| m.to == to).cloned()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: Email) -> Result<()> {
        self.outbox.lock().push(email);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Builds the account mails with absolute links
pub struct AccountMails<'a> {
    config: &'a MailConfig,
}

impl<'a> AccountMails<'a> {
    pub fn new(config: &'a MailConfig) -> Self {
        Self { config }
    }

    fn subject(&self, text: &str) -> String {
        format!("{} {}", self.config.subject_prefix, text)
    }

    fn link(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub fn confirm_account(&self, to: &str, username: &str, token: &str) -> Email {
        Email {
            to: to.to_string(),
            subject: self.subject("Confirm Your Account"),
            body: format!(
                "Dear {},\n\nWelcome to OpenOversight!\n\nTo confirm your account please click on the following link:\n\n{}\n\nSincerely,\nThe OpenOversight Team",
                username,
                self.link(&format!("/auth/confirm/{}", token))
            ),
        }
    }

    pub fn reset_password(&self, to: &str, username: &str, token: &str) -> Email {
        Email {
            to: to.to_string(),
            subject: self.subject("Reset Your Password"),
            body: format!(
                "Dear {},\n\nTo reset your password click on the following link:\n\n{}\n\nIf you have not requested a password reset simply ignore this message.\n\nSincerely,\nThe OpenOversight Team",
                username,
                self.link(&format!("/auth/reset/{}", token))
            ),
        }
    }

    pub fn change_email(&self, to: &str, username: &str, token: &str) -> Email {
        Email {
            to: to.to_string(),
            subject: self.subject("Confirm your email address"),
            body: format!(
                "Dear {},\n\nTo confirm your new email address click on the following link:\n\n{}\n\nSincerely,\nThe OpenOversight Team",
                username,
                self.link(&format!("/auth/change-email/{}", token))
            ),
        }
    }
}
