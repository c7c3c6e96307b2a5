pub mod bundled;
pub mod json;

pub use bundled::BundledSeed;
pub use json::{JsonSeed, SeedFile, SeedRecord};
