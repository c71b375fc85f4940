//! CLI command implementations

mod config_gen;
mod make_admin;
mod seed_demo;

pub use config_gen::config_generate;
pub use make_admin::make_admin;
pub use seed_demo::seed_demo;
