#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fouru_settings::{
    Control, Fieldset, FrameworkConfig, Identifier, KeyValueStore, MemoryStore, Section, SettingsManager,
    SettingsTab, TabHeader, UiHost,
};
use fouru_store::{Blob, StoreError};

pub const STORAGE_KEY: &str = "derpi_four_u";

/// A backend the test can keep looking at after handing it to the manager.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn with_blob(raw: &str) -> Self {
        Self(Rc::new(RefCell::new(MemoryStore::new().with_item(STORAGE_KEY, raw))))
    }

    pub fn raw(&self) -> Option<String> {
        self.0.borrow().get_item(STORAGE_KEY).unwrap()
    }

    pub fn blob(&self) -> Blob {
        serde_json::from_str(&self.raw().unwrap()).unwrap()
    }
}

impl KeyValueStore for SharedStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.borrow().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().remove_item(key)
    }
}

/// Everything the manager told the host.
#[derive(Debug, Default)]
pub struct HostLog {
    pub headers: Vec<TabHeader>,
    pub tabs_appended: usize,
    pub commit_bound: bool,
    pub sections: Vec<String>,
    pub fieldsets: Vec<(String, String)>,
    pub controls: Vec<(String, Option<String>, String)>,
    pub updates: Vec<(String, String)>,
    pub warnings: Vec<bool>,
    pub focused: Vec<String>,
}

pub struct RecordingHost {
    pub log: Rc<RefCell<HostLog>>,
    pub settings_table: bool,
    pub commit_trigger: bool,
    pub requested_tab: Option<String>,
}

impl RecordingHost {
    pub fn new() -> (Self, Rc<RefCell<HostLog>>) {
        let log = Rc::new(RefCell::new(HostLog::default()));
        let host = Self {
            log: Rc::clone(&log),
            settings_table: true,
            commit_trigger: true,
            requested_tab: None,
        };
        (host, log)
    }
}

impl UiHost for RecordingHost {
    fn has_settings_table(&self) -> bool {
        self.settings_table
    }

    fn has_commit_trigger(&self) -> bool {
        self.commit_trigger
    }

    fn append_tab_header(&mut self, header: &TabHeader) {
        self.log.borrow_mut().headers.push(header.clone());
    }

    fn append_tab_content(&mut self, _tab: &SettingsTab) {
        self.log.borrow_mut().tabs_appended += 1;
    }

    fn bind_commit(&mut self) {
        self.log.borrow_mut().commit_bound = true;
    }

    fn section_added(&mut self, section: &Section) {
        self.log.borrow_mut().sections.push(section.namespace.to_string());
    }

    fn fieldset_added(&mut self, namespace: &Identifier, fieldset: &Fieldset) {
        self.log
            .borrow_mut()
            .fieldsets
            .push((namespace.to_string(), fieldset.id.to_string()));
    }

    fn control_added(&mut self, namespace: &Identifier, fieldset: Option<&Identifier>, control: &Control) {
        self.log.borrow_mut().controls.push((
            namespace.to_string(),
            fieldset.map(ToString::to_string),
            control.element_id().to_string(),
        ));
    }

    fn control_updated(&mut self, namespace: &Identifier, control: &Control) {
        self.log
            .borrow_mut()
            .updates
            .push((namespace.to_string(), control.key().to_string()));
    }

    fn set_unsaved_warning(&mut self, visible: bool) {
        self.log.borrow_mut().warnings.push(visible);
    }

    fn requested_tab(&self) -> Option<String> {
        self.requested_tab.clone()
    }

    fn focus_tab(&mut self, tab_id: &str) -> bool {
        self.log.borrow_mut().focused.push(tab_id.to_string());
        tab_id == "userscript"
    }
}

/// A manager with a recording host over a shared in-memory store.
pub fn hosted(store: &SharedStore) -> (SettingsManager, Rc<RefCell<HostLog>>) {
    let (host, log) = RecordingHost::new();
    let manager =
        SettingsManager::new(FrameworkConfig::default(), Box::new(store.clone()), Some(Box::new(host))).unwrap();
    (manager, log)
}

pub fn headless(store: &SharedStore) -> SettingsManager {
    SettingsManager::headless(FrameworkConfig::default(), Box::new(store.clone())).unwrap()
}
