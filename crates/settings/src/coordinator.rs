//! Save/reset coordinator
//!
//! Save flushes every rendered control into the store in one blob write.
//! Reset restores controls to their declared defaults without touching the
//! store; the reset only persists through a later save.

use fouru_store::{storage, Blob, StoreError};

use crate::error::SettingsError;
use crate::host::ResetScope;
use crate::manager::Context;
use crate::page::SettingsTab;

/// Copy every live control value into `blob`. Returns the number written.
pub fn collect_live_values(tab: &SettingsTab, blob: &mut Blob) -> Result<usize, StoreError> {
    let mut written = 0;
    for (namespace, control) in tab.controls() {
        storage::bucket_mut(blob, namespace.as_str())?
            .insert(control.key().to_string(), control.value());
        written += 1;
    }
    Ok(written)
}

/// Restore defaults on the controls in `scope`.
///
/// Returns (namespace, key) of every control whose live value changed.
pub fn reset_controls(tab: &mut SettingsTab, scope: &ResetScope) -> Vec<(String, String)> {
    let mut changed = Vec::new();
    for section in tab.sections.iter_mut() {
        if let ResetScope::Namespace(ns) = scope {
            if section.namespace.as_str() != ns {
                continue;
            }
        }
        let namespace = section.namespace.to_string();
        for control in section.controls_mut() {
            if control.reset() {
                changed.push((namespace.clone(), control.key().to_string()));
            }
        }
    }
    changed
}

impl Context {
    pub(crate) fn save(&mut self) -> Result<usize, SettingsError> {
        let Some(ui) = self.ui.as_ref() else {
            return Ok(0);
        };

        let mut blob = self.storage.read_all()?;
        let written = collect_live_values(&ui.tab, &mut blob)?;
        self.storage.write_all(&blob)?;
        log::info!("Saved {written} setting(s)");

        self.recompute_dirty();
        Ok(written)
    }

    pub(crate) fn reset(&mut self, scope: &ResetScope) -> Result<usize, SettingsError> {
        let Some(ui) = self.ui.as_mut() else {
            return Ok(0);
        };

        if let ResetScope::Namespace(ns) = scope {
            if ui.tab.section(ns).is_none() {
                return Err(SettingsError::UnknownNamespace(ns.clone()));
            }
        }

        let changed = reset_controls(&mut ui.tab, scope);
        for (namespace, key) in &changed {
            if let Some(section) = ui.tab.section(namespace) {
                if let Some(control) = section.control(key) {
                    ui.host.control_updated(&section.namespace, control);
                }
            }
        }
        log::debug!("Reset {} control(s) to defaults ({scope:?})", changed.len());

        self.recompute_dirty();
        Ok(changed.len())
    }
}
