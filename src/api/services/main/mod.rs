//! 主站页面：公开浏览、提交、分拣与标注

mod departments;
mod find;
mod images;
mod officers;
mod pages;
pub mod routes;
mod tags;
mod users;

pub use departments::OfficerListQuery;
pub use images::TaggedQuery;
pub use pages::ComplaintQuery;
pub use routes::main_routes;
