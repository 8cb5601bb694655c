//! # Edit Session
//!
//! One user's editing state: the document, its history, the preview theme
//! and the association with a stored template. There is no global state;
//! everything a UI needs goes through an `EditSession`.
//!
//! Every committed change is captured in history right after it is applied,
//! so `history.current()` always equals the live component sequence.

use crate::{
    Document, EditorConfig, EditorError, Gesture, GestureOutcome, History, Mutation,
    MutationResult, Notice, Template, TemplateGateway, TemplatePatch,
};
use blockmail_compiler_html::{compile_export, render_preview, CompileOptions, Theme};
use blockmail_registry::{ComponentInstance, IdGenerator, Registry};

/// Stored template the document is associated with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub id: String,
    pub name: String,
}

pub struct EditSession {
    document: Document,
    history: History,
    registry: Registry,
    theme: Theme,
    options: CompileOptions,
    template: Option<TemplateRef>,
    preview: Option<String>,
}

impl EditSession {
    /// Empty session using the built-in component catalog
    pub fn new(config: EditorConfig) -> Self {
        Self::with_registry(config, Registry::builtin().clone())
    }

    pub fn with_registry(config: EditorConfig, registry: Registry) -> Self {
        Self {
            document: Document::new(),
            history: History::with_limit(config.history_limit),
            registry,
            theme: Theme::default(),
            options: CompileOptions::default(),
            template: None,
            preview: None,
        }
    }

    /// Use a fixed id generator (deterministic ids)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.document = Document::with_ids(ids);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.preview = None;
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn compile_options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn set_compile_options(&mut self, options: CompileOptions) {
        self.options = options;
        self.preview = None;
    }

    pub fn template(&self) -> Option<&TemplateRef> {
        self.template.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a mutation and record it when it is a commit point
    pub fn apply(&mut self, mutation: &Mutation) -> MutationResult {
        let result = mutation.apply(&mut self.document, &self.registry);
        if result.is_commit() {
            self.commit();
        }
        result
    }

    /// Set one property from raw editor input
    pub fn set_property(&mut self, component_id: &str, field: &str, value: &str) -> MutationResult {
        self.apply(&Mutation::set_property(component_id, field, value))
    }

    /// Set a boolean inside a record list (a social platform's `enabled`)
    pub fn set_record_flag(
        &mut self,
        component_id: &str,
        field: &str,
        index: usize,
        key: &str,
        value: bool,
    ) -> MutationResult {
        self.apply(&Mutation::set_record_flag(component_id, field, index, key, value))
    }

    /// Delete an instance. Unknown ids change nothing and return no notice.
    pub fn remove(&mut self, component_id: &str) -> Option<Notice> {
        let result = self.apply(&Mutation::remove(component_id));
        (result == MutationResult::Applied)
            .then(|| Notice::success("Component deleted", "Component removed from canvas"))
    }

    /// Remove every instance; undoable
    pub fn clear_canvas(&mut self) -> Notice {
        self.apply(&Mutation::ClearCanvas);
        tracing::info!("Canvas cleared");
        Notice::success("Canvas cleared", "All components have been removed")
    }

    /// Change selection. Not recorded in history.
    pub fn select(&mut self, component_id: Option<&str>) -> bool {
        let changed = self.document.select(component_id);
        if changed {
            self.preview = None;
        }
        changed
    }

    /// Resolve a drop on the canvas
    pub fn drop_gesture(&mut self, gesture: &Gesture) -> GestureOutcome {
        let outcome = gesture.apply(&mut self.document, &self.registry);
        if outcome.is_commit() {
            self.commit();
        }
        outcome
    }

    /// Resolve a raw drop payload (a type tag or an instance id)
    pub fn drop_payload(&mut self, payload: &str, target: Option<&str>) -> GestureOutcome {
        match Gesture::from_payload(payload, target, &self.document) {
            Some(gesture) => self.drop_gesture(&gesture),
            None => {
                tracing::debug!(payload, "unresolvable drop ignored");
                GestureOutcome::Ignored
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.document.restore(entry);
                self.preview = None;
                tracing::debug!(index = self.history.index(), "Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.document.restore(entry);
                self.preview = None;
                tracing::debug!(index = self.history.index(), "Redo");
                true
            }
            None => false,
        }
    }

    /// Start over: empty document, fresh history, no stored template
    pub fn new_document(&mut self) {
        self.document.replace(Vec::new());
        self.history.reset(Vec::new());
        self.template = None;
        self.preview = None;
    }

    /// Replace the document with a stored template
    pub fn load(&mut self, template: Template) -> Notice {
        tracing::info!(template_id = %template.id, components = template.components.len(), "Template loaded");

        self.history.reset(template.components.clone());
        self.document.replace(template.components);
        self.preview = None;

        let notice = Notice::success(
            "Template loaded",
            format!("\"{}\" has been loaded", template.name),
        );
        self.template = Some(TemplateRef {
            id: template.id,
            name: template.name,
        });
        notice
    }

    /// Replace the document with components that are not (yet) stored,
    /// e.g. a local template file
    pub fn open(&mut self, components: Vec<ComponentInstance>) {
        self.history.reset(components.clone());
        self.document.replace(components);
        self.template = None;
        self.preview = None;
    }

    /// Save to the associated template.
    ///
    /// Without an association a name is needed first ([`EditSession::save_as`]).
    pub async fn save<G: TemplateGateway>(&mut self, gateway: &G) -> Result<Notice, EditorError> {
        if self.document.is_empty() {
            return Err(EditorError::EmptyDocument);
        }

        let Some(template) = &self.template else {
            return Err(EditorError::NameRequired);
        };

        let patch = TemplatePatch::components(self.document.snapshot());
        gateway.update(&template.id, patch).await.map_err(|err| {
            tracing::warn!(template_id = %template.id, %err, "Template update failed");
            EditorError::gateway("update template", err)
        })?;

        tracing::info!(template_id = %template.id, "Template updated");
        Ok(Notice::success("Template updated", "Your changes have been saved"))
    }

    /// Store the document as a new template and associate with it
    pub async fn save_as<G: TemplateGateway>(
        &mut self,
        gateway: &G,
        name: &str,
    ) -> Result<Notice, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::NameRequired);
        }
        if self.document.is_empty() {
            return Err(EditorError::EmptyDocument);
        }

        let saved = gateway
            .create(name, self.document.components())
            .await
            .map_err(|err| {
                tracing::warn!(%err, "Template create failed");
                EditorError::gateway("save template", err)
            })?;

        tracing::info!(template_id = %saved.id, name, "Template saved");
        self.template = Some(TemplateRef {
            id: saved.id,
            name: name.to_string(),
        });

        Ok(Notice::success(
            "Template saved",
            "Your template has been saved successfully",
        ))
    }

    pub async fn list_templates<G: TemplateGateway>(
        &self,
        gateway: &G,
    ) -> Result<Vec<Template>, EditorError> {
        gateway
            .list()
            .await
            .map_err(|err| EditorError::gateway("load templates", err))
    }

    /// Delete a stored template. The document is never touched.
    pub async fn delete_template<G: TemplateGateway>(
        &self,
        gateway: &G,
        id: &str,
    ) -> Result<Notice, EditorError> {
        gateway.delete(id).await.map_err(|err| {
            tracing::warn!(template_id = id, %err, "Template delete failed");
            EditorError::gateway("delete template", err)
        })?;

        tracing::info!(template_id = id, "Template deleted");
        Ok(Notice::success("Template deleted", "The template has been removed"))
    }

    /// Editor canvas markup, cached until the next change
    pub fn preview(&mut self) -> &str {
        let Self {
            document,
            theme,
            options,
            preview,
            ..
        } = self;

        preview.get_or_insert_with(|| {
            render_preview(document.components(), document.selected(), *theme, options)
        })
    }

    /// Standalone HTML email for the current document
    pub fn export(&self) -> Result<String, EditorError> {
        if self.document.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        Ok(compile_export(self.document.components(), self.theme, &self.options))
    }

    fn commit(&mut self) {
        self.history.push(self.document.snapshot());
        self.preview = None;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryGateway;
    use blockmail_registry::ComponentType;

    fn session() -> EditSession {
        EditSession::default().with_ids(IdGenerator::from_seed("s"))
    }

    fn add(session: &mut EditSession, ty: ComponentType) -> String {
        match session.drop_gesture(&Gesture::insert(ty, None)) {
            GestureOutcome::Inserted { id, .. } => id,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_history_tracks_live_document() {
        let mut session = session();
        let id = add(&mut session, ComponentType::Text);
        assert_eq!(session.history().current(), session.document().components());

        session.set_property(&id, "content", "Hello");
        assert_eq!(session.history().current(), session.document().components());

        session.remove(&id);
        assert_eq!(session.history().current(), session.document().components());
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn test_selection_is_not_recorded() {
        let mut session = session();
        let id = add(&mut session, ComponentType::Spacer);
        let len = session.history().len();

        session.select(None);
        session.select(Some(id.as_str()));
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_unknown_remove_is_full_noop() {
        let mut session = session();
        let id = add(&mut session, ComponentType::Spacer);
        let len = session.history().len();

        assert_eq!(session.remove("missing"), None);
        assert_eq!(session.history().len(), len);
        assert_eq!(session.document().selected(), Some(id.as_str()));
    }

    #[test]
    fn test_clear_canvas_is_undoable() {
        let mut session = session();
        add(&mut session, ComponentType::Header);
        add(&mut session, ComponentType::Footer);

        session.clear_canvas();
        assert!(session.document().is_empty());

        assert!(session.undo());
        assert_eq!(session.document().len(), 2);
    }

    #[test]
    fn test_preview_cache_invalidated() {
        let mut session = session();
        let empty = session.preview().to_string();
        assert!(empty.contains("empty-state"));

        let id = add(&mut session, ComponentType::Button);
        let framed = session.preview().to_string();
        assert!(framed.contains("canvas-component selected"));

        session.select(None);
        assert!(!session.preview().contains("canvas-component selected"));

        session.set_property(&id, "text", "Go");
        assert!(session.preview().contains(">Go</a>"));

        session.toggle_theme();
        assert!(session.preview().contains("email-preview dark-mode"));
    }

    #[test]
    fn test_export_requires_components() {
        let mut session = session();
        assert!(matches!(session.export(), Err(EditorError::EmptyDocument)));

        add(&mut session, ComponentType::Divider);
        let html = session.export().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_new_document_forgets_everything() {
        let mut session = session();
        session.load(Template {
            id: "9".to_string(),
            name: "Promo".to_string(),
            components: Vec::new(),
        });
        add(&mut session, ComponentType::Cta);

        session.new_document();

        assert!(session.document().is_empty());
        assert_eq!(session.history().len(), 1);
        assert!(!session.can_undo());
        assert_eq!(session.template(), None);
    }

    #[test]
    fn test_open_unstored_components() {
        let mut source = session();
        add(&mut source, ComponentType::Header);
        add(&mut source, ComponentType::Footer);

        let mut session = EditSession::default();
        session.open(source.document().snapshot());

        assert_eq!(session.document().components(), source.document().components());
        assert_eq!(session.history().current(), session.document().components());
        assert!(!session.can_undo());
        assert_eq!(session.template(), None);
    }

    #[tokio::test]
    async fn test_save_flows() {
        let gateway = MemoryGateway::new();
        let mut session = session();

        assert!(matches!(session.save(&gateway).await, Err(EditorError::EmptyDocument)));

        add(&mut session, ComponentType::Hero);
        assert!(matches!(session.save(&gateway).await, Err(EditorError::NameRequired)));
        assert!(matches!(
            session.save_as(&gateway, "   ").await,
            Err(EditorError::NameRequired)
        ));

        let notice = session.save_as(&gateway, " Launch ").await.unwrap();
        assert_eq!(notice.title, "Template saved");
        assert_eq!(
            session.template(),
            Some(&TemplateRef {
                id: "1".to_string(),
                name: "Launch".to_string()
            })
        );

        add(&mut session, ComponentType::Footer);
        let notice = session.save(&gateway).await.unwrap();
        assert_eq!(notice.title, "Template updated");
        assert_eq!(gateway.templates()[0].components.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_changes_nothing() {
        let gateway = MemoryGateway::offline();
        let mut session = session();
        add(&mut session, ComponentType::Text);
        let history_len = session.history().len();

        let err = session.save_as(&gateway, "Draft").await.unwrap_err();
        assert_eq!(err.notice().message, "Failed to save template");
        assert_eq!(session.template(), None);
        assert_eq!(session.history().len(), history_len);
        assert_eq!(session.document().len(), 1);
    }
}
