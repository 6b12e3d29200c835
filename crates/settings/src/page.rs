//! Settings tab page model
//!
//! What the host draws: one tab holding a section per namespace, each with
//! its controls and fieldsets in registration order. The model owns the live
//! control state; the host mirrors it.

use fouru_config::FrameworkConfig;
use fouru_core::Identifier;

use crate::control::Control;

/// Header link inserted into the host's tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHeader {
    pub tab_id: String,
    pub title: String,
}

/// Description text under a section, fieldset or control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    /// Section and fieldset descriptions get extra spacing
    pub section_description: bool,
}

impl Description {
    fn section(text: Option<&str>) -> Option<Self> {
        text.map(|t| Self { text: t.to_string(), section_description: true })
    }
}

/// A fieldset grouping controls inside a section.
#[derive(Debug, Clone, PartialEq)]
pub struct Fieldset {
    pub id: Identifier,
    pub title: String,
    pub description: Option<Description>,
    pub controls: Vec<Control>,
}

impl Fieldset {
    pub fn new(id: Identifier, title: &str, description: Option<&str>) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: Description::section(description),
            controls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Control(Control),
    Fieldset(Fieldset),
}

/// Everything one namespace contributes to the tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub namespace: Identifier,
    pub title: String,
    pub description: Option<Description>,
    pub reset_label: String,
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn new(namespace: Identifier, title: &str, description: Option<&str>, reset_label: &str) -> Self {
        Self {
            namespace,
            title: title.to_string(),
            description: Description::section(description),
            reset_label: reset_label.to_string(),
            items: Vec::new(),
        }
    }

    /// All controls, fieldset members included, in display order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.items.iter().flat_map(|item| match item {
            SectionItem::Control(c) => std::slice::from_ref(c).iter(),
            SectionItem::Fieldset(f) => f.controls.iter(),
        })
    }

    pub fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.items.iter_mut().flat_map(|item| match item {
            SectionItem::Control(c) => std::slice::from_mut(c).iter_mut(),
            SectionItem::Fieldset(f) => f.controls.iter_mut(),
        })
    }

    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls().find(|c| c.key().as_str() == key)
    }

    pub fn control_mut(&mut self, key: &str) -> Option<&mut Control> {
        self.controls_mut().find(|c| c.key().as_str() == key)
    }

    pub fn fieldset_mut(&mut self, id: &str) -> Option<&mut Fieldset> {
        self.items.iter_mut().find_map(|item| match item {
            SectionItem::Fieldset(f) if f.id.as_str() == id => Some(f),
            _ => None,
        })
    }

    /// Append a control at section level or to the end of a fieldset.
    ///
    /// Returns the control back if the fieldset does not exist.
    pub fn push_control(&mut self, fieldset: Option<&str>, control: Control) -> Result<(), Control> {
        match fieldset {
            None => {
                self.items.push(SectionItem::Control(control));
                Ok(())
            }
            Some(id) => match self.fieldset_mut(id) {
                Some(f) => {
                    f.controls.push(control);
                    Ok(())
                }
                None => Err(control),
            },
        }
    }
}

/// The settings tab with its chrome and every namespace section.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsTab {
    pub tab_id: String,
    pub title: String,
    pub notice: String,
    pub reset_all_label: String,
    pub unsaved_warning: String,
    pub unsaved_warning_visible: bool,
    pub sections: Vec<Section>,
}

impl SettingsTab {
    pub fn new(config: &FrameworkConfig) -> Self {
        Self {
            tab_id: config.tab_id.clone(),
            title: config.tab_title.clone(),
            notice: config.tab_notice.clone(),
            reset_all_label: config.reset_all_label.clone(),
            unsaved_warning: config.unsaved_warning.clone(),
            unsaved_warning_visible: false,
            sections: Vec::new(),
        }
    }

    pub fn header(&self) -> TabHeader {
        TabHeader {
            tab_id: self.tab_id.clone(),
            title: self.title.clone(),
        }
    }

    pub fn section(&self, namespace: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.namespace.as_str() == namespace)
    }

    pub fn section_mut(&mut self, namespace: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.namespace.as_str() == namespace)
    }

    pub fn control(&self, namespace: &str, key: &str) -> Option<&Control> {
        self.section(namespace)?.control(key)
    }

    /// Every rendered control with its namespace.
    pub fn controls(&self) -> impl Iterator<Item = (&Identifier, &Control)> {
        self.sections
            .iter()
            .flat_map(|s| s.controls().map(move |c| (&s.namespace, c)))
    }

    pub fn control_count(&self) -> usize {
        self.sections.iter().map(|s| s.controls().count()).sum()
    }
}
