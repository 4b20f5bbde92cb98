mod page;
mod user;

pub use page::{Page, PageMeta};
pub use user::{Gender, NewUser, Seniority, UpdateUser, User, UserChangeset};
