//! # Per-Type Content Fragments
//!
//! One render case per [`ComponentType`]. The preview renderer and the export
//! compiler both call [`render_fragment`], so the content they emit for an
//! instance cannot diverge; only the decoration around it differs.
//!
//! Every interpolated string is HTML-escaped. Numeric fields are read from
//! already-coerced integers/floats, so no non-numeric marker can reach a
//! size-bearing attribute.

use crate::context::{escape_html as esc, Context};
use crate::icons::social_icon;
use crate::{CompileOptions, Theme};
use blockmail_registry::{ComponentInstance, ComponentType, Props};

/// Render the content fragment for one instance.
///
/// Unknown types render as an empty string.
pub fn render_fragment(instance: &ComponentInstance, theme: Theme, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);
    let props = instance.props();

    match instance.component_type() {
        ComponentType::Header => header(&mut ctx, props, theme),
        ComponentType::Hero => hero(&mut ctx, props),
        ComponentType::Text => text(&mut ctx, props, theme),
        ComponentType::Button => button(&mut ctx, props),
        ComponentType::Image => image(&mut ctx, props),
        ComponentType::Divider => divider(&mut ctx, props),
        ComponentType::Spacer => spacer(&mut ctx, props),
        ComponentType::Social => social(&mut ctx, props, theme),
        ComponentType::TwoColumn => two_column(&mut ctx, props, theme),
        ComponentType::Footer => footer(&mut ctx, props, theme),
        ComponentType::NewsHeader => news_header(&mut ctx, props),
        ComponentType::Cta => cta(&mut ctx, props),
        ComponentType::FeaturesTwo => features_two(&mut ctx, props),
        ComponentType::ImageBlock => image_block(&mut ctx, props),
        ComponentType::DataTable => data_table(&mut ctx, props),
        ComponentType::TitleParagraph => title_paragraph(&mut ctx, props),
        ComponentType::FeaturesThree => features_three(&mut ctx, props),
        ComponentType::Unknown(_) => {}
    }

    ctx.get_output()
}

const FULL_TABLE: &str = r#"<table width="100%" cellpadding="0" cellspacing="0" border="0">"#;

fn header(ctx: &mut Context, props: &Props, theme: Theme) {
    ctx.open(&format!(
        r#"<div style="padding: 24px; background-color: {}; text-align: center;">"#,
        esc(props.text("backgroundColor"))
    ));
    let logo = props.text("logoUrl");
    if !logo.is_empty() {
        ctx.add_line(&format!(
            r#"<img src="{}" alt="Logo" style="max-height: 50px; margin-bottom: 8px;">"#,
            esc(logo)
        ));
    }
    ctx.add_line(&format!(
        r#"<div style="font-size: 20px; font-weight: 600; color: {};">{}</div>"#,
        esc(theme.pick(props.text("textColor"), "#ffffff")),
        esc(props.text("companyName"))
    ));
    ctx.close("</div>");
}

fn hero(ctx: &mut Context, props: &Props) {
    ctx.open(&format!(
        r#"<div style="position: relative; min-height: 200px; background: url('{}') center/cover no-repeat;">"#,
        esc(props.text("imageUrl"))
    ));
    ctx.open(&format!(
        r#"<div style="position: absolute; inset: 0; background: rgba(0,0,0,{}); display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 40px; text-align: center;">"#,
        props.float("overlayOpacity")
    ));
    ctx.add_line(&format!(
        r#"<h2 style="font-size: 28px; font-weight: 700; color: #ffffff; margin: 0 0 12px 0;">{}</h2>"#,
        esc(props.text("headline"))
    ));
    ctx.add_line(&format!(
        r#"<p style="font-size: 16px; color: rgba(255,255,255,0.9); margin: 0;">{}</p>"#,
        esc(props.text("subtext"))
    ));
    ctx.close("</div>");
    ctx.close("</div>");
}

fn text(ctx: &mut Context, props: &Props, theme: Theme) {
    ctx.open(r#"<div style="padding: 24px;">"#);
    ctx.add_line(&format!(
        r#"<p style="font-size: {}px; text-align: {}; color: {}; margin: 0; line-height: 1.6;">{}</p>"#,
        props.int("fontSize"),
        esc(props.text("textAlign")),
        esc(theme.pick(props.text("textColor"), "#e0e0e0")),
        esc(props.text("content"))
    ));
    ctx.close("</div>");
}

fn button(ctx: &mut Context, props: &Props) {
    ctx.open(&format!(
        r#"<div style="padding: 24px; text-align: {};">"#,
        esc(props.text("align"))
    ));
    ctx.add_line(&format!(
        r#"<a href="{}" style="display: inline-block; padding: 12px 28px; background-color: {}; color: {}; text-decoration: none; font-weight: 500; border-radius: {}px;">{}</a>"#,
        esc(props.text("url")),
        esc(props.text("backgroundColor")),
        esc(props.text("textColor")),
        props.int("borderRadius"),
        esc(props.text("text"))
    ));
    ctx.close("</div>");
}

fn image(ctx: &mut Context, props: &Props) {
    let max_width = match props.text("width") {
        "75%" => "75%",
        "50%" => "50%",
        _ => "100%",
    };
    ctx.open(&format!(
        r#"<div style="padding: 16px; text-align: {};">"#,
        esc(props.text("align"))
    ));
    ctx.add_line(&format!(
        r#"<img src="{}" alt="{}" style="max-width: {}; height: auto; border-radius: 4px;">"#,
        esc(props.text("url")),
        esc(props.text("alt")),
        max_width
    ));
    ctx.close("</div>");
}

fn divider(ctx: &mut Context, props: &Props) {
    ctx.open(r#"<div style="padding: 16px 24px;">"#);
    ctx.add_line(&format!(
        r#"<hr style="border: none; border-top: {}px {} {}; margin: 0;">"#,
        props.int("thickness"),
        esc(props.text("style")),
        esc(props.text("color"))
    ));
    ctx.close("</div>");
}

fn spacer(ctx: &mut Context, props: &Props) {
    ctx.add_line(&format!(
        r#"<div style="height: {}px;"></div>"#,
        props.int("height")
    ));
}

fn social(ctx: &mut Context, props: &Props, theme: Theme) {
    let icon_size = props.int("iconSize");
    let color = theme.pick("#666666", "#a0a0a0");

    ctx.open(&format!(
        r#"<div style="padding: 24px; text-align: {};">"#,
        esc(props.text("align"))
    ));
    for platform in props.records("platforms") {
        let enabled = platform.get("enabled").and_then(|f| f.as_flag()).unwrap_or(false);
        if !enabled {
            continue;
        }
        let name = platform.get("name").and_then(|f| f.as_text()).unwrap_or("");
        let url = platform.get("url").and_then(|f| f.as_text()).unwrap_or("");
        ctx.open(&format!(
            r#"<a href="{}" style="display: inline-block; margin: 0 8px; color: {}; width: {}px; height: {}px;">"#,
            esc(url),
            color,
            icon_size,
            icon_size
        ));
        ctx.add_line(social_icon(name));
        ctx.close("</a>");
    }
    ctx.close("</div>");
}

fn two_column(ctx: &mut Context, props: &Props, theme: Theme) {
    let half_gap = props.int("gap") as f64 / 2.0;
    let color = theme.pick("#4a4a4a", "#e0e0e0");

    ctx.open(r#"<div style="padding: 24px;">"#);
    ctx.open(FULL_TABLE);
    ctx.open("<tr>");
    for (side, field) in [("right", "leftContent"), ("left", "rightContent")] {
        ctx.open(&format!(
            r#"<td width="48%" style="vertical-align: top; padding-{}: {}px;">"#,
            side, half_gap
        ));
        ctx.add_line(&format!(
            r#"<p style="margin: 0; color: {};">{}</p>"#,
            color,
            esc(props.text(field))
        ));
        ctx.close("</td>");
    }
    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</div>");
}

fn footer(ctx: &mut Context, props: &Props, theme: Theme) {
    let text_color = props.text("textColor");

    ctx.open(&format!(
        r#"<div style="padding: 32px; background-color: {}; text-align: center;">"#,
        esc(theme.pick(props.text("backgroundColor"), "#2a2a2a"))
    ));
    ctx.add_line(&format!(
        r#"<p style="margin: 0 0 8px 0; font-size: 14px; color: {};">{}</p>"#,
        esc(theme.pick(text_color, "#a0a0a0")),
        esc(props.text("companyName"))
    ));
    ctx.add_line(&format!(
        r#"<p style="margin: 0 0 16px 0; font-size: 12px; color: {};">{}</p>"#,
        esc(theme.pick(text_color, "#808080")),
        esc(props.text("address"))
    ));
    ctx.add_line(&format!(
        r#"<a href="{}" style="font-size: 12px; color: {};">{}</a>"#,
        esc(props.text("unsubscribeUrl")),
        esc(theme.pick(text_color, "#a0a0a0")),
        esc(props.text("unsubscribeText"))
    ));
    ctx.close("</div>");
}

fn news_header(ctx: &mut Context, props: &Props) {
    ctx.open(&format!(
        r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" style="background:{};">"#,
        esc(props.text("bgColor"))
    ));
    ctx.open("<tr>");
    ctx.open(r#"<td width="33%" style="padding:10px 25px; text-align:center; vertical-align:middle;">"#);
    let logo = props.text("logoUrl");
    if !logo.is_empty() {
        ctx.add_line(&format!(
            r#"<img src="{}" alt="Logo" style="display:block; max-width:144px; width:100%; height:auto;" />"#,
            esc(logo)
        ));
    }
    ctx.close("</td>");
    ctx.add_line(r#"<td width="34%" style="padding:10px 25px; vertical-align:middle; text-align:left;"></td>"#);
    ctx.open(r#"<td width="33%" style="padding:10px 25px; vertical-align:middle; text-align:left; font-family:Ubuntu, Helvetica, Arial, sans-serif; font-size:13px; line-height:120%; color:#000000;">"#);
    ctx.add_line(&esc(props.text("newsText")).replace('\n', "<br/>"));
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
}

fn cta(ctx: &mut Context, props: &Props) {
    ctx.open(FULL_TABLE);
    ctx.open("<tr>");
    ctx.open(r#"<td align="center" style="padding:10px 25px;">"#);
    ctx.open(r#"<table cellpadding="0" cellspacing="0" border="0" style="border-collapse:separate;">"#);
    ctx.open("<tr>");
    ctx.open(&format!(
        r#"<td align="center" bgcolor="{}" style="border:none;border-radius:3px;padding:10px 25px;">"#,
        esc(props.text("bgColor"))
    ));
    ctx.add_line(&format!(
        r#"<span style="color:{};font-family:Helvetica,Arial,sans-serif;font-size:13px;line-height:120%;">{}</span>"#,
        esc(props.text("textColor")),
        esc(props.text("text"))
    ));
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
}

fn features_two(ctx: &mut Context, props: &Props) {
    ctx.open(FULL_TABLE);
    ctx.open("<tr>");
    ctx.open(r#"<td style="padding:10px 25px; vertical-align:top;">"#);
    ctx.open(FULL_TABLE);
    ctx.open("<tr>");
    for (title, body) in [("leftTitle", "leftText"), ("rightTitle", "rightText")] {
        ctx.open(r#"<td width="50%" style="padding:10px; vertical-align:top;">"#);
        ctx.add_line(&format!(
            r#"<h2 style="margin:0;font-size:18px;">{}</h2>"#,
            esc(props.text(title))
        ));
        ctx.add_line(&format!(
            r#"<p style="margin:8px 0 0 0; font-size:13px;">{}</p>"#,
            esc(props.text(body))
        ));
        ctx.close("</td>");
    }
    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
}

fn image_block(ctx: &mut Context, props: &Props) {
    ctx.open(FULL_TABLE);
    ctx.open("<tr>");
    ctx.open(r#"<td align="center" style="padding:10px 25px;">"#);
    ctx.add_line(&format!(
        r#"<img src="{}" alt="{}" style="border:0;display:block;outline:none;text-decoration:none;height:auto;width:{}px;" />"#,
        esc(props.text("src")),
        esc(props.text("alt")),
        props.int("width")
    ));
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
}

fn data_table(ctx: &mut Context, props: &Props) {
    ctx.open(r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" style="padding:10px 25px;">"#);
    ctx.open(r#"<tr style="border-bottom:1px solid #ecedee;text-align:left;padding:15px 0;">"#);
    for header in props.list("headers") {
        ctx.add_line(&format!(
            r#"<th style="padding: 0 15px 0 0;">{}</th>"#,
            esc(header)
        ));
    }
    ctx.close("</tr>");
    for row in props.table("rows") {
        let cells: String = row
            .iter()
            .map(|cell| format!(r#"<td style="padding: 8px 15px;">{}</td>"#, esc(cell)))
            .collect();
        ctx.add_line(&format!("<tr>{}</tr>", cells));
    }
    ctx.close("</table>");
}

fn title_paragraph(ctx: &mut Context, props: &Props) {
    ctx.open(r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" style="padding:10px 25px;">"#);
    ctx.open("<tr>");
    ctx.open(r#"<td align="left">"#);
    ctx.add_line(&format!(
        r#"<h1 style="margin:0 0 8px 0;">{}</h1>"#,
        esc(props.text("title"))
    ));
    for paragraph in props.list("paragraphs") {
        ctx.add_line(&format!(r#"<p style="margin:0 0 8px 0;">{}</p>"#, esc(paragraph)));
    }
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");
}

fn features_three(ctx: &mut Context, props: &Props) {
    ctx.open(r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" style="padding:10px 25px;">"#);
    ctx.open("<tr>");
    for item in props.records("items") {
        let field = |key: &str| item.get(key).and_then(|f| f.as_text()).unwrap_or("");
        ctx.open(r#"<td width="33%" style="padding:10px;text-align:center;vertical-align:top;">"#);
        ctx.add_line(&format!(
            r#"<img src="{}" alt="" style="width:50px;height:auto;display:block;margin:0 auto 10px auto;" />"#,
            esc(field("icon"))
        ));
        ctx.add_line(&format!(
            r#"<div style="font-size:14px;font-weight:600;margin-bottom:6px;">{}</div>"#,
            esc(field("title"))
        ));
        ctx.add_line(&format!(
            r#"<div style="font-size:13px;color:#9da3a3;">{}</div>"#,
            esc(field("text"))
        ));
        ctx.close("</td>");
    }
    ctx.close("</tr>");
    ctx.close("</table>");
}
