//! Model catalog types.

use serde::{Deserialize, Serialize};

use crate::types::Provider;

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Provider-scoped model identifier.
    pub id: String,

    /// Human-readable name.
    #[serde(rename = "name")]
    pub display_name: String,
}

impl ModelEntry {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Ordered model lists, one per provider. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub openrouter: Vec<ModelEntry>,
    pub openai: Vec<ModelEntry>,
}

impl ModelCatalog {
    /// Models for a provider, in display order.
    pub fn models_for(&self, provider: Provider) -> &[ModelEntry] {
        match provider {
            Provider::OpenRouter => &self.openrouter,
            Provider::OpenAi => &self.openai,
        }
    }

    /// Look up a model by id within a provider.
    pub fn find(&self, provider: Provider, id: &str) -> Option<&ModelEntry> {
        self.models_for(provider).iter().find(|m| m.id == id)
    }
}
