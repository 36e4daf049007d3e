mod cache;
mod error;
mod identity;
mod store;

pub use cache::{TaskCache, CACHED_TASKS_KEY};
pub use error::StorageError;
pub use identity::{IdentityStore, UserProfile, CURRENT_USER_KEY, DEMO_USERS};
pub use store::LocalStore;
