pub mod file;

pub use file::FileEngine;
