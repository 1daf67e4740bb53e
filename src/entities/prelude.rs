pub use super::categories::Entity as Categories;
pub use super::users::Entity as Users;
pub use super::videos::Entity as Videos;
