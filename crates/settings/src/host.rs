//! UI host contract
//!
//! The host page owns the real widgets. It must already have a tabbed
//! settings container and a commit (save) trigger; without them the manager
//! runs headless. The manager pushes model changes to the host through
//! [`UiHost`], and the host feeds user actions back as [`UiEvent`]s.
//!
//! Host callbacks run while the manager is mid-operation, so a host must not
//! call back into the manager from inside them; queue the event instead.

use fouru_config::FrameworkConfig;
use fouru_core::{Identifier, Value};

use crate::control::Control;
use crate::page::{Fieldset, Section, SettingsTab, TabHeader};

/// The page the settings tab is installed into.
pub trait UiHost {
    /// Whether the tabbed settings container exists on this page.
    fn has_settings_table(&self) -> bool;

    /// Whether the page's commit trigger exists.
    fn has_commit_trigger(&self) -> bool;

    fn append_tab_header(&mut self, header: &TabHeader);

    /// Insert the (still empty) tab after the last existing tab.
    fn append_tab_content(&mut self, tab: &SettingsTab);

    /// Start reporting the commit trigger as [`UiEvent::Commit`].
    fn bind_commit(&mut self);

    fn section_added(&mut self, section: &Section);

    fn fieldset_added(&mut self, namespace: &Identifier, fieldset: &Fieldset);

    fn control_added(&mut self, namespace: &Identifier, fieldset: Option<&Identifier>, control: &Control);

    /// A control's live value changed from the model side (reset).
    fn control_updated(&mut self, namespace: &Identifier, control: &Control);

    fn set_unsaved_warning(&mut self, visible: bool);

    /// Tab the page was asked to open with, e.g. from `?active_tab=`.
    fn requested_tab(&self) -> Option<String> {
        None
    }

    /// Switch the visible tab. Returns false if the tab elements are missing.
    fn focus_tab(&mut self, _tab_id: &str) -> bool {
        false
    }
}

/// User actions reported by the host, processed strictly in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A control inside a namespace section was edited.
    ControlChanged {
        namespace: String,
        key: String,
        value: Value,
    },
    /// The page's commit trigger fired.
    Commit,
    /// A reset link was clicked.
    Reset(ResetScope),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetScope {
    Namespace(String),
    All,
}

/// A host that passed detection, with the tab installed into it.
pub(crate) struct Ui {
    pub host: Box<dyn UiHost>,
    pub tab: SettingsTab,
}

impl Ui {
    /// Detect the host's capabilities and install the settings tab.
    ///
    /// Returns `None` when the page cannot carry the tab.
    pub fn install(mut host: Box<dyn UiHost>, config: &FrameworkConfig) -> Option<Self> {
        if !host.has_settings_table() {
            log::debug!("No settings table on this page; running headless");
            return None;
        }
        if !host.has_commit_trigger() {
            log::warn!("Settings table has no commit trigger; running headless");
            return None;
        }

        let tab = SettingsTab::new(config);
        host.append_tab_header(&tab.header());
        host.append_tab_content(&tab);
        host.bind_commit();

        if let Some(requested) = host.requested_tab() {
            if !host.focus_tab(&requested) {
                log::warn!("Missing tab element for '{requested}'");
            }
        }

        Some(Self { host, tab })
    }
}
