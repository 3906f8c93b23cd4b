#![forbid(unsafe_code)]

pub mod model;
pub mod route;

pub use route::{AppPath, PathError};
