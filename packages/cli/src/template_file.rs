use anyhow::{Context as _, Result};
use blockmail_editor::{ComponentInstance, EditSession, Template};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A template kept on disk: `{ "id"?, "name", "components" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Id in the template store, once pushed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
}

impl TemplateFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read template {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid template file {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Snapshot of a session's document
    pub fn from_session(session: &EditSession, name: &str) -> Self {
        let template = session.template();
        Self {
            id: template.map(|t| t.id.clone()),
            name: template.map(|t| t.name.clone()).unwrap_or_else(|| name.to_string()),
            components: session.document().snapshot(),
        }
    }

    /// Load into a session; a pushed file stays associated with its id
    pub fn open_in(self, session: &mut EditSession) {
        match self.id {
            Some(id) => {
                session.load(Template {
                    id,
                    name: self.name,
                    components: self.components,
                });
            }
            None => session.open(self.components),
        }
    }
}

impl From<Template> for TemplateFile {
    fn from(template: Template) -> Self {
        Self {
            id: Some(template.id),
            name: template.name,
            components: template.components,
        }
    }
}

/// File name for a template name: `Spring Sale!` becomes `spring-sale.json`
pub fn file_name_for(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "template.json".to_string()
    } else {
        format!("{}.json", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_editor::{ComponentType, Gesture};

    #[test]
    fn test_file_name_for() {
        assert_eq!(file_name_for("Spring Sale!"), "spring-sale.json");
        assert_eq!(file_name_for("  Q3 -- report "), "q3-report.json");
        assert_eq!(file_name_for("???"), "template.json");
    }

    #[test]
    fn test_id_is_optional() {
        let file: TemplateFile = serde_json::from_str(r#"{"name":"Draft"}"#).unwrap();
        assert_eq!(file.id, None);
        assert!(file.components.is_empty());

        let json = serde_json::to_string(&file).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/welcome.json");

        let mut session = EditSession::default();
        session.drop_gesture(&Gesture::insert(ComponentType::Header, None));
        let file = TemplateFile::from_session(&session, "Welcome");
        file.write(&path).unwrap();

        let read = TemplateFile::read(&path).unwrap();
        assert_eq!(read, file);
        assert_eq!(read.components.len(), 1);
    }

    #[test]
    fn test_open_keeps_store_association() {
        let file = TemplateFile {
            id: Some("7".to_string()),
            name: "Promo".to_string(),
            components: Vec::new(),
        };
        let mut session = EditSession::default();
        file.open_in(&mut session);
        assert_eq!(session.template().map(|t| t.id.as_str()), Some("7"));

        let draft = TemplateFile {
            id: None,
            name: "Draft".to_string(),
            components: Vec::new(),
        };
        draft.open_in(&mut session);
        assert_eq!(session.template(), None);
    }
}
