pub mod assets;
pub mod auth;
pub mod helpers;
pub mod main;

pub use assets::asset_routes;
pub use auth::auth_routes;
pub use main::main_routes;
