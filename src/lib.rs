//! OpenOversight - a public database of law enforcement officers
//!
//! Volunteers upload photographs, sort the ones that show officers and tag
//! faces with officer records; the public searches the records by
//! department, name, badge and demographics.
//!
//! # Architecture
//! - `api`: HTTP routes, middleware, forms and server-rendered pages
//! - `storage`: SeaORM storage backend and the demo data set
//! - `services`: mail delivery and upload storage
//! - `config`: TOML + environment configuration
//! - `runtime`: server startup / shutdown and management commands
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
