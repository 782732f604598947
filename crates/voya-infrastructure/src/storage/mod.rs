//! Storage primitives for the client's local files.

mod atomic_file;

pub use atomic_file::{StorageError, load_toml, store_toml};
