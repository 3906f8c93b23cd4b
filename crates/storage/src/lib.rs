#![forbid(unsafe_code)]

pub mod file;
pub mod session;

pub use file::FileSessionStore;
pub use session::{InMemorySessionStore, SessionStore, Storage, StorageError, TOKEN_KEY};
