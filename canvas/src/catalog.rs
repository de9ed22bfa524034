//! Business entity lookup used by the palette's entity-backed node kinds.
//!
//! Nodes such as organizations, roles, or wallets are not placed blindly:
//! the host first lists the concrete entities of that category and the user
//! picks one. Where those entities live is the host's concern, so the canvas
//! only sees them through [`EntityDirectory`].

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Category of business entity a node kind can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BusinessCategory {
    Organization,
    Role,
    Member,
    Instrument,
    Contract,
    Wallet,
    Integration,
    Workflow,
    Contact,
    Agent,
}

impl BusinessCategory {
    /// Title shown on the entity picker.
    #[must_use]
    pub fn picker_title(self) -> &'static str {
        match self {
            Self::Organization => "Select Organization",
            Self::Role => "Select Role",
            Self::Member => "Select Person",
            Self::Instrument => "Select Instrument",
            Self::Contract => "Select Contract",
            Self::Wallet => "Select Wallet",
            Self::Integration => "Select Integration",
            Self::Workflow => "Select Workflow",
            Self::Contact => "Select Contact",
            Self::Agent => "Select Agent",
        }
    }
}

/// One row in the entity picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntitySummary {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), description: None }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Source of existing business entities, grouped by category.
pub trait EntityDirectory {
    /// All entities of `category`, in display order.
    fn entities(&self, category: BusinessCategory) -> Vec<EntitySummary>;

    /// Look up one entity by category and id.
    fn find(&self, category: BusinessCategory, id: &str) -> Option<EntitySummary> {
        self.entities(category).into_iter().find(|e| e.id == id)
    }
}
