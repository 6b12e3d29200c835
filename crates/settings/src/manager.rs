//! Settings manager
//!
//! One [`SettingsManager`] per page session. It owns the store adapter, the
//! schema registry and (when a host was detected) the rendered tab. Add-ons
//! hold cheap [`NamespaceHandle`]/[`GroupHandle`] clones that all point
//! at the same session state.
//!
//! Everything runs on the page's single UI thread, so the shared state is an
//! `Rc<RefCell<_>>` rather than a lock.

use std::cell::RefCell;
use std::rc::Rc;

use fouru_config::FrameworkConfig;
use fouru_core::{EntrySpec, Identifier, Value};
use fouru_store::{KeyValueStore, SettingsStorage};

use crate::error::SettingsError;
use crate::host::{ResetScope, Ui, UiEvent, UiHost};
use crate::page::SettingsTab;
use crate::registry::Registry;

pub(crate) struct Context {
    pub config: FrameworkConfig,
    pub storage: SettingsStorage,
    pub registry: Registry,
    pub ui: Option<Ui>,
}

/// Entry point for add-ons and the host page.
#[derive(Clone)]
pub struct SettingsManager {
    ctx: Rc<RefCell<Context>>,
}

impl SettingsManager {
    /// Initialize storage and, if `host` passes detection, install the tab.
    pub fn new(
        config: FrameworkConfig,
        backend: Box<dyn KeyValueStore>,
        host: Option<Box<dyn UiHost>>,
    ) -> Result<Self, SettingsError> {
        let mut storage = SettingsStorage::new(backend, config.storage_key.clone());
        storage.initialize()?;

        let ui = host.and_then(|host| Ui::install(host, &config));

        Ok(Self {
            ctx: Rc::new(RefCell::new(Context {
                config,
                storage,
                registry: Registry::default(),
                ui,
            })),
        })
    }

    /// A manager that validates schemas and serves get/set/delete only.
    pub fn headless(config: FrameworkConfig, backend: Box<dyn KeyValueStore>) -> Result<Self, SettingsError> {
        Self::new(config, backend, None)
    }

    pub fn is_headless(&self) -> bool {
        self.ctx.borrow().ui.is_none()
    }

    /// Declare an add-on's settings scope.
    pub fn register_namespace(
        &self,
        title: &str,
        id: &str,
        description: Option<&str>,
    ) -> Result<NamespaceHandle, SettingsError> {
        let id = self.ctx.borrow_mut().register_namespace(title, id, description)?;
        Ok(NamespaceHandle {
            ctx: Rc::clone(&self.ctx),
            id,
        })
    }

    /// Process one host event. Returns the dirty state afterwards.
    pub fn handle_event(&self, event: UiEvent) -> Result<bool, SettingsError> {
        match event {
            UiEvent::ControlChanged { namespace, key, value } => self.control_changed(&namespace, &key, &value),
            UiEvent::Commit => {
                self.save()?;
                Ok(self.is_dirty())
            }
            UiEvent::Reset(scope) => {
                self.reset(&scope)?;
                Ok(self.is_dirty())
            }
        }
    }

    /// Apply a user edit to a control and recompute dirty state.
    pub fn control_changed(&self, namespace: &str, key: &str, value: &Value) -> Result<bool, SettingsError> {
        let mut ctx = self.ctx.borrow_mut();
        let control = ctx
            .ui
            .as_mut()
            .and_then(|ui| ui.tab.section_mut(namespace))
            .and_then(|section| section.control_mut(key))
            .ok_or_else(|| SettingsError::UnknownControl {
                namespace: namespace.to_string(),
                key: key.to_string(),
            })?;
        control.set_value(value);
        Ok(ctx.recompute_dirty())
    }

    /// Flush every rendered control into the store. Returns the number saved.
    pub fn save(&self) -> Result<usize, SettingsError> {
        self.ctx.borrow_mut().save()
    }

    /// Restore controls to defaults without persisting. Returns the number changed.
    pub fn reset(&self, scope: &ResetScope) -> Result<usize, SettingsError> {
        self.ctx.borrow_mut().reset(scope)
    }

    pub fn is_dirty(&self) -> bool {
        self.ctx
            .borrow()
            .ui
            .as_ref()
            .is_some_and(|ui| ui.tab.unsaved_warning_visible)
    }

    /// Live value of a rendered control.
    pub fn control_value(&self, namespace: &str, key: &str) -> Option<Value> {
        let ctx = self.ctx.borrow();
        ctx.ui.as_ref()?.tab.control(namespace, key).map(|c| c.value())
    }

    /// Inspect the rendered tab, if any.
    pub fn with_tab<R>(&self, f: impl FnOnce(&SettingsTab) -> R) -> Option<R> {
        let ctx = self.ctx.borrow();
        ctx.ui.as_ref().map(|ui| f(&ui.tab))
    }

    pub fn namespace_ids(&self) -> Vec<Identifier> {
        self.ctx
            .borrow()
            .registry
            .namespaces()
            .iter()
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn config(&self) -> FrameworkConfig {
        self.ctx.borrow().config.clone()
    }
}

fn log_registration_failure(namespace: &Identifier, spec: &EntrySpec, err: &SettingsError) {
    log::error!("Skipping entry {:?} in '{}': {}", spec.key.as_deref().unwrap_or("?"), namespace, err);
}

/// An add-on's view of its namespace.
#[derive(Clone)]
pub struct NamespaceHandle {
    ctx: Rc<RefCell<Context>>,
    id: Identifier,
}

impl NamespaceHandle {
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Add a group, rendered as a fieldset; purely organizational, never
    /// touches the store.
    pub fn add_group(
        &self,
        title: &str,
        id: &str,
        description: Option<&str>,
    ) -> Result<GroupHandle, SettingsError> {
        let id = self.ctx.borrow_mut().add_group(&self.id, title, id, description)?;
        Ok(GroupHandle {
            ctx: Rc::clone(&self.ctx),
            namespace: self.id.clone(),
            id,
        })
    }

    /// Register an entry, logging and skipping it on failure.
    ///
    /// Returns whether the entry was registered.
    pub fn register_entry(&self, spec: EntrySpec) -> bool {
        match self.try_register_entry(&spec) {
            Ok(()) => true,
            Err(e) => {
                log_registration_failure(&self.id, &spec, &e);
                false
            }
        }
    }

    pub fn try_register_entry(&self, spec: &EntrySpec) -> Result<(), SettingsError> {
        self.ctx.borrow_mut().register_entry(&self.id, None, spec)
    }

    /// Stored value for `key`, bypassing any rendered control.
    pub fn get_entry(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.ctx.borrow().storage.get_value(self.id.as_str(), key)?)
    }

    /// Store `value` under `key`.
    ///
    /// Not checked against the entry's declared kind: storing a value of the
    /// wrong type is the caller's responsibility.
    pub fn set_entry(&self, key: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
        Ok(self
            .ctx
            .borrow_mut()
            .storage
            .set_value(self.id.as_str(), key, value.into())?)
    }

    /// Remove `key` from the store. Returns the removed value, if any.
    pub fn delete_entry(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.ctx.borrow_mut().storage.delete_value(self.id.as_str(), key)?)
    }
}

/// A group inside a namespace; entries registered here still store into
/// the namespace's flat key space.
#[derive(Clone)]
pub struct GroupHandle {
    ctx: Rc<RefCell<Context>>,
    namespace: Identifier,
    id: Identifier,
}

impl GroupHandle {
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn namespace(&self) -> &Identifier {
        &self.namespace
    }

    pub fn register_entry(&self, spec: EntrySpec) -> bool {
        match self.try_register_entry(&spec) {
            Ok(()) => true,
            Err(e) => {
                log_registration_failure(&self.namespace, &spec, &e);
                false
            }
        }
    }

    pub fn try_register_entry(&self, spec: &EntrySpec) -> Result<(), SettingsError> {
        self.ctx
            .borrow_mut()
            .register_entry(&self.namespace, Some(&self.id), spec)
    }
}
