//! Account routes: sessions, registration, mailed tokens and user administration

mod account;
mod email;
mod password;
pub mod routes;
pub mod tokens;
mod users;

pub use account::NextQuery;
pub use routes::auth_routes;
