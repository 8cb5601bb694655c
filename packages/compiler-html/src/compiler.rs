use crate::context::{escape_html, Context};
use crate::{render_fragment, CompileOptions, Theme};
use blockmail_registry::ComponentInstance;

const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

/// Width of the centered email column, in pixels
const CONTENT_WIDTH: u32 = 870;

const MSO_SETTINGS: &str = r#"<!--[if mso]>
<noscript>
  <xml>
    <o:OfficeDocumentSettings>
      <o:PixelsPerInch>96</o:PixelsPerInch>
    </o:OfficeDocumentSettings>
  </xml>
</noscript>
<![endif]-->"#;

// meyerweb.com reset v2.0 (public domain), plus image and print rules
const RESET_CSS: &str = r#"html, body, div, span, applet, object, iframe,
h1, h2, h3, h4, h5, h6, p, blockquote, pre,
a, abbr, acronym, address, big, cite, code,
del, dfn, em, img, ins, kbd, q, s, samp,
small, strike, strong, sub, sup, tt, var,
b, u, i, center,
dl, dt, dd, ol, ul, li,
fieldset, form, label, legend,
table, caption, tbody, tfoot, thead, tr, th, td,
article, aside, canvas, details, embed,
figure, figcaption, footer, header, hgroup,
menu, nav, output, ruby, section, summary,
time, mark, audio, video {
  margin: 0;
  padding: 0;
  border: 0;
  font-size: 100%;
  font: inherit;
  vertical-align: baseline;
}
article, aside, details, figcaption, figure,
footer, header, hgroup, menu, nav, section {
  display: block;
}
body {
  line-height: 1;
}
ol, ul {
  list-style: none;
}
blockquote, q {
  quotes: none;
}
blockquote:before, blockquote:after,
q:before, q:after {
  content: '';
  content: none;
}
table {
  border-collapse: collapse;
  border-spacing: 0;
}
img {
  max-width: 100%;
  height: auto;
  vertical-align: middle;
  font-style: italic;
  background-repeat: no-repeat;
  background-size: cover;
  shape-margin: 1rem;
}
@media print {
  @page {
    margin: 0;
    size: landscape;
  }
  body {
    print-color-adjust: exact !important;
    -webkit-print-color-adjust: exact !important;
  }
}"#;

/// Compile a component sequence to a standalone HTML email document.
///
/// The output is a pure function of `(components, theme, options)`. It never
/// contains editor chrome, ids, or selection state.
pub fn compile_export(
    components: &[ComponentInstance],
    theme: Theme,
    options: &CompileOptions,
) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.open(r#"<html lang="en">"#);

    compile_head(&mut ctx);
    compile_body(components, theme, &mut ctx);

    ctx.close("</html>");

    tracing::debug!(components = components.len(), ?theme, "compiled export");

    ctx.get_output()
}

fn compile_head(ctx: &mut Context) {
    ctx.open("<head>");

    ctx.add_line(r#"<meta charset="UTF-8">"#);
    ctx.add_line(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    let title = escape_html(&ctx.options().title);
    ctx.add_line(&format!("<title>{}</title>", title));

    add_block(ctx, MSO_SETTINGS);

    ctx.open("<style>");
    add_block(ctx, RESET_CSS);
    ctx.close("</style>");

    ctx.close("</head>");
}

fn compile_body(components: &[ComponentInstance], theme: Theme, ctx: &mut Context) {
    let background = theme.background();

    ctx.open(&format!(
        r#"<body style="margin: 0; padding: 0; font-family: {}; background-color: {}; color: {};">"#,
        FONT_STACK,
        background,
        theme.foreground()
    ));
    ctx.open(&format!(
        r#"<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: {};">"#,
        background
    ));
    ctx.open("<tr>");
    ctx.open(r#"<td align="center" style="padding: 24px;">"#);
    ctx.open(&format!(
        r#"<table role="presentation" width="{}" cellpadding="0" cellspacing="0" border="0" style="max-width: {}px; background-color: {};">"#,
        CONTENT_WIDTH, CONTENT_WIDTH, background
    ));
    ctx.open("<tr>");
    ctx.open("<td>");

    for component in components {
        let fragment = render_fragment(component, theme, ctx.options());
        ctx.add_raw(&fragment);
    }

    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</body>");
}

fn add_block(ctx: &mut Context, block: &str) {
    for line in block.lines() {
        ctx.add_line(line);
    }
}
