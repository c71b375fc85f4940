pub mod assignment;
pub mod department;
pub mod face;
pub mod image;
pub mod officer;
pub mod unit;
pub mod user;

pub use assignment::Entity as AssignmentEntity;
pub use department::Entity as DepartmentEntity;
pub use face::Entity as FaceEntity;
pub use image::Entity as ImageEntity;
pub use officer::Entity as OfficerEntity;
pub use unit::Entity as UnitEntity;
pub use user::Entity as UserEntity;
