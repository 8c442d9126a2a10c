mod builtin;
mod types;

pub use types::{ModuleSpec, RubricCatalog, MAX_RATING};
