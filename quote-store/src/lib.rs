pub mod factory;
pub mod file;
pub mod memory;

pub use factory::{StoreConfig, open_store};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
