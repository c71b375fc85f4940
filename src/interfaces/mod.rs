//! User-facing interfaces besides the web site

pub mod cli;
