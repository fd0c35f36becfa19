// Application layer - use cases over the catalog file.
// Each operation is a full load, mutate, save cycle; nothing is cached
// between calls.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
