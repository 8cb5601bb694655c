use crate::context::{escape_html, Context};
use crate::icons;
use crate::{render_fragment, CompileOptions, Theme};
use blockmail_registry::ComponentInstance;

/// Render the editor canvas for a component sequence.
///
/// Each instance is wrapped in a frame carrying its id, a `selected` marker
/// when it matches `selected`, and the drag/delete action buttons. An empty
/// sequence renders the empty-state placeholder.
pub fn render_preview(
    components: &[ComponentInstance],
    selected: Option<&str>,
    theme: Theme,
    options: &CompileOptions,
) -> String {
    let mut ctx = Context::new(options);

    let class = if theme.is_dark() {
        "email-preview dark-mode"
    } else {
        "email-preview"
    };
    ctx.open(&format!(r#"<div class="{}">"#, class));

    if components.is_empty() {
        render_empty_state(&mut ctx);
    }

    for component in components {
        render_frame(component, selected == Some(component.id()), theme, &mut ctx);
    }

    ctx.close("</div>");

    tracing::debug!(components = components.len(), ?theme, "rendered preview");

    ctx.get_output()
}

fn render_empty_state(ctx: &mut Context) {
    ctx.open(r#"<div class="empty-state" id="emptyState">"#);
    ctx.add_line(icons::EMPTY_CANVAS);
    ctx.add_line("<p>Drag components here to start building your email</p>");
    ctx.close("</div>");
}

fn render_frame(component: &ComponentInstance, selected: bool, theme: Theme, ctx: &mut Context) {
    let id = escape_html(component.id());
    let class = if selected {
        "canvas-component selected"
    } else {
        "canvas-component"
    };

    ctx.open(&format!(
        r#"<div class="{}" data-id="{}" data-testid="canvas-component-{}">"#,
        class, id, id
    ));

    ctx.open(r#"<div class="component-actions">"#);
    ctx.add_line(&format!(
        r#"<button class="action-btn drag-handle" title="Drag to reorder">{}</button>"#,
        icons::DRAG_HANDLE
    ));
    ctx.add_line(&format!(
        r#"<button class="action-btn delete" title="Delete component" data-testid="button-delete-{}">{}</button>"#,
        id,
        icons::DELETE
    ));
    ctx.close("</div>");

    let fragment = render_fragment(component, theme, ctx.options());
    ctx.add_raw(&fragment);

    ctx.close("</div>");
}
