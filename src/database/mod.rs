pub mod manager;
pub mod memory;
pub mod models;
pub mod post_store;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryPostStore;
pub use post_store::PgPostStore;
pub use store::PostStore;
