//! `fouru-core`: identifiers, scalar values and the entry schema shared by
//! the store and the settings registry.

pub mod error;
pub mod identifier;
pub mod schema;
pub mod value;

pub use error::SchemaError;
pub use identifier::{validate, Identifier};
pub use schema::{Entry, EntryKind, EntrySpec, EntryType, Selection};
pub use value::Value;
