//! `fouru-settings`: user-configurable settings for add-ons embedded in a
//! host page.
//!
//! Add-ons declare a namespace and its entries through [`SettingsManager`];
//! the manager seeds defaults into the store, renders a control per entry
//! when the page can host a settings tab, tracks unsaved changes and
//! saves or resets on request. Without a host it runs headless and only
//! serves `get_entry`/`set_entry`/`delete_entry`.

pub mod control;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod manager;
pub mod page;
pub mod registry;
pub mod tracker;

pub use control::{ChoiceOption, Control, Widget};
pub use error::SettingsError;
pub use host::{ResetScope, UiEvent, UiHost};
pub use manager::{GroupHandle, NamespaceHandle, SettingsManager};
pub use page::{Description, Fieldset, Section, SectionItem, SettingsTab, TabHeader};

pub use fouru_config::FrameworkConfig;
pub use fouru_core::{EntrySpec, EntryType, Identifier, Selection, Value};
pub use fouru_store::{FileStore, KeyValueStore, MemoryStore};
