//! # Template Persistence
//!
//! The editor talks to template storage through [`TemplateGateway`]. The
//! HTTP implementation lives in `blockmail-gateway`; [`MemoryGateway`] keeps
//! everything in process for tests and offline use.

use blockmail_registry::ComponentInstance;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// A stored template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
}

/// Partial update; absent fields are left as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentInstance>>,
}

impl TemplatePatch {
    pub fn components(components: Vec<ComponentInstance>) -> Self {
        Self {
            name: None,
            components: Some(components),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            components: None,
        }
    }

    /// Apply to a stored template
    pub fn merge_into(self, template: &mut Template) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(components) = self.components {
            template.components = components;
        }
    }
}

/// Request body for creating a template
#[derive(Debug, Clone, Serialize)]
pub struct NewTemplate<'a> {
    pub name: &'a str,
    pub components: &'a [ComponentInstance],
}

/// Template storage.
///
/// Every method may fail with a transport error; callers surface it to the
/// user and leave local state untouched.
#[allow(async_fn_in_trait)]
pub trait TemplateGateway {
    type Error: std::error::Error;

    async fn list(&self) -> Result<Vec<Template>, Self::Error>;

    async fn create(&self, name: &str, components: &[ComponentInstance]) -> Result<Template, Self::Error>;

    async fn update(&self, id: &str, patch: TemplatePatch) -> Result<Template, Self::Error>;

    async fn delete(&self, id: &str) -> Result<(), Self::Error>;
}

// Stores may hand out numeric or string ids; both are kept as strings.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryGatewayError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template store is offline")]
    Offline,
}

/// In-process template store with sequential ids
#[derive(Debug, Default)]
pub struct MemoryGateway {
    templates: Mutex<Vec<Template>>,
    next_id: AtomicU64,
    offline: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, for exercising error paths
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Copy of every stored template
    pub fn templates(&self) -> Vec<Template> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Template>> {
        // every write is a single push or assign, so a poisoned store is still whole
        self.templates.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), MemoryGatewayError> {
        if self.offline {
            Err(MemoryGatewayError::Offline)
        } else {
            Ok(())
        }
    }
}

impl TemplateGateway for MemoryGateway {
    type Error = MemoryGatewayError;

    async fn list(&self) -> Result<Vec<Template>, Self::Error> {
        self.check_online()?;
        Ok(self.templates())
    }

    async fn create(&self, name: &str, components: &[ComponentInstance]) -> Result<Template, Self::Error> {
        self.check_online()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let template = Template {
            id: id.to_string(),
            name: name.to_string(),
            components: components.to_vec(),
        };
        self.lock().push(template.clone());
        Ok(template)
    }

    async fn update(&self, id: &str, patch: TemplatePatch) -> Result<Template, Self::Error> {
        self.check_online()?;
        let mut templates = self.lock();
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| MemoryGatewayError::NotFound(id.to_string()))?;
        patch.merge_into(template);
        Ok(template.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), Self::Error> {
        self.check_online()?;
        let mut templates = self.lock();
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Err(MemoryGatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
