//! Change tracker
//!
//! Dirty state is recomputed from scratch on every control mutation: each
//! rendered control's live value against the persisted value for its
//! (namespace, key). No debouncing; entry counts are in the tens.

use fouru_store::Blob;

use crate::manager::Context;
use crate::page::SettingsTab;

/// True if any rendered control differs from what the store holds.
pub fn has_unsaved_changes(tab: &SettingsTab, blob: &Blob) -> bool {
    tab.controls().any(|(namespace, control)| {
        let stored = blob
            .get(namespace.as_str())
            .and_then(|bucket| bucket.get(control.key().as_str()));
        stored != Some(&control.value())
    })
}

impl Context {
    /// Recompute dirty state and show or hide the unsaved-changes banner.
    ///
    /// An unreadable store counts as dirty. Headless sessions are never dirty.
    pub(crate) fn recompute_dirty(&mut self) -> bool {
        let Some(ui) = self.ui.as_mut() else {
            return false;
        };

        let dirty = match self.storage.read_all() {
            Ok(blob) => has_unsaved_changes(&ui.tab, &blob),
            Err(e) => {
                log::warn!("Cannot compare against stored settings: {e}");
                true
            }
        };

        ui.tab.unsaved_warning_visible = dirty;
        ui.host.set_unsaved_warning(dirty);
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::render;
    use crate::page::Section;
    use fouru_config::FrameworkConfig;
    use fouru_core::{EntrySpec, Identifier, Value};
    use fouru_store::Bucket;

    fn tab_with_toggle(live: bool) -> SettingsTab {
        let ns = Identifier::new("myscript").unwrap();
        let entry = EntrySpec::new()
            .title("Enable X")
            .key("enableX")
            .entry_type("boolean")
            .default_value(false)
            .build()
            .unwrap();
        let mut section = Section::new(ns.clone(), "My Script", None, "Default");
        section.push_control(None, render(&ns, &entry, &Value::Bool(live))).unwrap();

        let mut tab = SettingsTab::new(&FrameworkConfig::default());
        tab.sections.push(section);
        tab
    }

    fn blob_with(value: Value) -> Blob {
        let mut bucket = Bucket::new();
        bucket.insert("enableX".into(), value);
        let mut blob = Blob::new();
        blob.insert("myscript".into(), bucket);
        blob
    }

    #[test]
    fn test_clean_when_values_match() {
        assert!(!has_unsaved_changes(&tab_with_toggle(false), &blob_with(Value::Bool(false))));
    }

    #[test]
    fn test_dirty_when_values_differ() {
        assert!(has_unsaved_changes(&tab_with_toggle(true), &blob_with(Value::Bool(false))));
    }

    #[test]
    fn test_dirty_when_stored_type_differs() {
        assert!(has_unsaved_changes(&tab_with_toggle(true), &blob_with(Value::from("true"))));
    }

    #[test]
    fn test_dirty_when_value_missing() {
        assert!(has_unsaved_changes(&tab_with_toggle(false), &Blob::new()));
    }
}
