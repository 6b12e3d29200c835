//! Settings registry
//!
//! The schema tree (namespace → groups → entries) and the registration
//! operations that validate it, seed the store with defaults and hand
//! entries to the renderer.

use fouru_core::{Entry, EntrySpec, Identifier, SchemaError};

use crate::control;
use crate::error::SettingsError;
use crate::manager::Context;
use crate::page::{Fieldset, Section, SectionItem};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSchema {
    pub id: Identifier,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredEntry {
    pub entry: Entry,
    pub group: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceSchema {
    pub id: Identifier,
    pub title: String,
    pub description: Option<String>,
    pub groups: Vec<GroupSchema>,
    pub entries: Vec<RegisteredEntry>,
}

impl NamespaceSchema {
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .map(|r| &r.entry)
            .find(|e| e.key.as_str() == key)
    }

    pub fn has_group(&self, id: &str) -> bool {
        self.groups.iter().any(|f| f.id.as_str() == id)
    }
}

/// Every namespace registered this session, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    namespaces: Vec<NamespaceSchema>,
}

impl Registry {
    pub fn namespaces(&self) -> &[NamespaceSchema] {
        &self.namespaces
    }

    pub fn namespace(&self, id: &str) -> Option<&NamespaceSchema> {
        self.namespaces.iter().find(|n| n.id.as_str() == id)
    }

    fn namespace_mut(&mut self, id: &str) -> Result<&mut NamespaceSchema, SettingsError> {
        self.namespaces
            .iter_mut()
            .find(|n| n.id.as_str() == id)
            .ok_or_else(|| SettingsError::UnknownNamespace(id.to_string()))
    }

    fn add_namespace(&mut self, schema: NamespaceSchema) -> Result<(), SchemaError> {
        if self.namespace(schema.id.as_str()).is_some() {
            return Err(SchemaError::DuplicateIdentifier {
                scope: "namespace",
                id: schema.id.to_string(),
            });
        }
        self.namespaces.push(schema);
        Ok(())
    }
}

impl Context {
    pub(crate) fn register_namespace(
        &mut self,
        title: &str,
        id: &str,
        description: Option<&str>,
    ) -> Result<Identifier, SettingsError> {
        let id = Identifier::new(id)?;

        // Reject duplicates before touching the store
        if self.registry.namespace(id.as_str()).is_some() {
            return Err(SchemaError::DuplicateIdentifier {
                scope: "namespace",
                id: id.to_string(),
            }
            .into());
        }

        if self.storage.ensure_namespace(id.as_str())? {
            log::debug!("Created storage bucket for '{id}'");
        }

        self.registry.add_namespace(NamespaceSchema {
            id: id.clone(),
            title: title.to_string(),
            description: description.map(str::to_string),
            groups: Vec::new(),
            entries: Vec::new(),
        })?;

        if let Some(ui) = self.ui.as_mut() {
            let section = Section::new(id.clone(), title, description, &self.config.reset_label);
            ui.host.section_added(&section);
            ui.tab.sections.push(section);
        }

        Ok(id)
    }

    pub(crate) fn add_group(
        &mut self,
        namespace: &Identifier,
        title: &str,
        id: &str,
        description: Option<&str>,
    ) -> Result<Identifier, SettingsError> {
        let id = Identifier::new(id)?;
        let schema = self.registry.namespace_mut(namespace.as_str())?;
        if schema.has_group(id.as_str()) {
            return Err(SchemaError::DuplicateIdentifier {
                scope: "group",
                id: id.to_string(),
            }
            .into());
        }
        schema.groups.push(GroupSchema {
            id: id.clone(),
            title: title.to_string(),
            description: description.map(str::to_string),
        });

        if let Some(ui) = self.ui.as_mut() {
            if let Some(section) = ui.tab.section_mut(namespace.as_str()) {
                let fieldset = Fieldset::new(id.clone(), title, description);
                ui.host.fieldset_added(namespace, &fieldset);
                section.items.push(SectionItem::Fieldset(fieldset));
            }
        }

        Ok(id)
    }

    /// Validate `spec`, seed its default if the key is new, and render it.
    pub(crate) fn register_entry(
        &mut self,
        namespace: &Identifier,
        group: Option<&Identifier>,
        spec: &EntrySpec,
    ) -> Result<(), SettingsError> {
        let entry = spec.build()?;

        let schema = self.registry.namespace_mut(namespace.as_str())?;
        if let Some(group) = group {
            if !schema.has_group(group.as_str()) {
                return Err(SettingsError::UnknownGroup {
                    namespace: namespace.to_string(),
                    group: group.to_string(),
                });
            }
        }
        if schema.entry(entry.key.as_str()).is_some() {
            return Err(SchemaError::DuplicateIdentifier {
                scope: "entry",
                id: entry.key.to_string(),
            }
            .into());
        }

        let current = match self.storage.get_value(namespace.as_str(), entry.key.as_str())? {
            Some(stored) => stored,
            None => {
                let default = entry.default_value();
                self.storage
                    .set_value(namespace.as_str(), entry.key.as_str(), default.clone())?;
                log::debug!("Seeded '{}.{}' with its default", namespace, entry.key);
                default
            }
        };

        if let Some(ui) = self.ui.as_mut() {
            if let Some(section) = ui.tab.section_mut(namespace.as_str()) {
                let control = control::render(namespace, &entry, &current);
                section
                    .push_control(group.map(Identifier::as_str), control)
                    .map_err(|_| SettingsError::UnknownGroup {
                        namespace: namespace.to_string(),
                        group: group.map(ToString::to_string).unwrap_or_default(),
                    })?;
                if let Some(control) = section.control(entry.key.as_str()) {
                    ui.host.control_added(namespace, group, control);
                }
            }
        }

        self.registry
            .namespace_mut(namespace.as_str())?
            .entries
            .push(RegisteredEntry {
                entry,
                group: group.cloned(),
            });
        Ok(())
    }
}
