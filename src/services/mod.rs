//! Service layer
//!
//! Side-effecting collaborators shared by the HTTP handlers and the CLI.

pub mod mailer;
pub mod uploads;

pub use mailer::{AccountMails, Email, LogMailer, Mailer, MemoryMailer};
pub use uploads::{ImageStore, StoredFile};
