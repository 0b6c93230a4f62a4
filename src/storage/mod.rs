// storage/mod.rs
// Durable local storage module

pub mod kv;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod test_helpers;

// Re-export commonly used items
pub use kv::{KeyValueStore, SqliteStore, StorageResult};
pub use memory::MemoryStore;
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
