pub mod categories;
pub mod page;
pub mod users;
pub mod videos;

pub use categories::CategoryRepository;
pub use page::{Page, PageRequest, SortDir};
pub use users::UserRepository;
pub use videos::VideoRepository;
