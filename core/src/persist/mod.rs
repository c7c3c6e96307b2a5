pub mod memory;
pub mod r#trait;

pub use memory::MemoryEngine;
pub use r#trait::PersistenceEngine;
