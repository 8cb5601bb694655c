//! # Component Registry
//!
//! Static catalog mapping each [`ComponentType`] to its property shape and
//! canonical default values.
//!
//! Instances are always created from a *copy* of the stored defaults, so no
//! instance ever shares property storage with the catalog or with another
//! instance.
//!
//! Adding a block type is additive: a new `ComponentType` variant, one
//! [`Entry`] registered here, and a render case in the HTML compiler.

use crate::props::{record, PropValue, Props, Record, RecordField};
use crate::schema::{FieldKind, FieldSpec, RecordKey};
use crate::{ComponentInstance, ComponentType, IdGenerator, RegistryError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

const ALIGN: &[&str] = &["left", "center", "right"];
const IMAGE_WIDTHS: &[&str] = &["full", "75%", "50%"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted"];

const PLATFORM_KEYS: &[RecordKey] = &[
    RecordKey::text("name"),
    RecordKey::text("url"),
    RecordKey::flag("enabled"),
];

const FEATURE_KEYS: &[RecordKey] = &[
    RecordKey::text("icon"),
    RecordKey::text("title"),
    RecordKey::text("text"),
];

/// Property shape and defaults of one component type
#[derive(Debug, Clone, Default)]
pub struct Entry {
    fields: Vec<FieldSpec>,
    defaults: Props,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with its kind and default value
    pub fn field(mut self, name: &'static str, kind: FieldKind, default: impl Into<PropValue>) -> Self {
        let default = default.into();
        debug_assert!(default.fits(&kind), "default for '{}' does not fit its kind", name);
        self.fields.push(FieldSpec { name, kind });
        self.defaults.set(name, default);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Catalog of component types
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<ComponentType, Entry>,
}

impl Registry {
    /// Registry with no types registered
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared registry holding the built-in catalog
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(Registry::with_builtin_types)
    }

    /// Fresh registry populated with every built-in type
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::empty();
        for ty in ComponentType::CATALOG.iter() {
            if let Some(entry) = builtin_entry(ty) {
                registry.register(ty.clone(), entry);
            }
        }
        registry
    }

    /// Register (or replace) a type's shape and defaults
    pub fn register(&mut self, ty: ComponentType, entry: Entry) {
        self.entries.insert(ty, entry);
    }

    pub fn contains(&self, ty: &ComponentType) -> bool {
        self.entries.contains_key(ty)
    }

    /// Registered types in catalog order
    pub fn types(&self) -> Vec<ComponentType> {
        let mut types: Vec<_> = self.entries.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn fields(&self, ty: &ComponentType) -> Option<&[FieldSpec]> {
        self.entries.get(ty).map(|entry| entry.fields())
    }

    pub fn field(&self, ty: &ComponentType, name: &str) -> Option<&FieldSpec> {
        self.fields(ty)?.iter().find(|field| field.name == name)
    }

    /// A copy of the type's default properties
    pub fn defaults(&self, ty: &ComponentType) -> Result<Props, RegistryError> {
        self.entries
            .get(ty)
            .map(|entry| entry.defaults.clone())
            .ok_or_else(|| RegistryError::unknown_type(ty.as_str()))
    }

    /// Create a new instance of `ty` with fresh id and default properties
    pub fn create_instance(
        &self,
        ty: &ComponentType,
        ids: &mut IdGenerator,
    ) -> Result<ComponentInstance, RegistryError> {
        let props = self.defaults(ty)?;
        Ok(ComponentInstance::new(ids.new_id(), ty.clone(), props))
    }

    /// Rebuild typed props from persisted JSON.
    ///
    /// For catalog types every schema field is taken from `raw` when it has the
    /// right shape, otherwise from the defaults; fields outside the schema are
    /// dropped. Numbers are clamped into the field's range. Unknown types keep
    /// every field verbatim.
    pub fn conform(&self, ty: &ComponentType, raw: &Map<String, Value>) -> Props {
        match self.entries.get(ty) {
            Some(entry) => entry
                .fields
                .iter()
                .map(|field| {
                    let value = raw
                        .get(field.name)
                        .and_then(|value| PropValue::from_json(&field.kind, value))
                        .or_else(|| entry.defaults.get(field.name).cloned())
                        .unwrap_or(PropValue::Text(String::new()));
                    (field.name, value)
                })
                .collect(),
            None => raw
                .iter()
                .map(|(name, value)| (name.clone(), PropValue::from_json_any(value)))
                .collect(),
        }
    }
}

fn platform(name: &str, url: &str) -> Record {
    record([
        ("name", RecordField::Text(name.to_string())),
        ("url", RecordField::Text(url.to_string())),
        ("enabled", RecordField::Flag(true)),
    ])
}

fn feature(icon: &str, title: &str) -> Record {
    record([
        ("icon", RecordField::Text(icon.to_string())),
        ("title", RecordField::Text(title.to_string())),
        (
            "text",
            RecordField::Text("Lorem ipsum dolor sit amet, consectetur adipiscing elit.".to_string()),
        ),
    ])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_entry(ty: &ComponentType) -> Option<Entry> {
    let entry = match ty {
        ComponentType::Header => Entry::new()
            .field("logoUrl", FieldKind::Text, "")
            .field("companyName", FieldKind::Text, "MMIT")
            .field("backgroundColor", FieldKind::Color, "#ffffff")
            .field("textColor", FieldKind::Color, "#1a1a1a"),

        ComponentType::Hero => Entry::new()
            .field(
                "imageUrl",
                FieldKind::Text,
                "https://images.unsplash.com/photo-1557804506-669a67965ba0?w=600&h=300&fit=crop",
            )
            .field("headline", FieldKind::Text, "Welcome to Our Newsletter")
            .field(
                "subtext",
                FieldKind::Text,
                "Stay updated with the latest news and exclusive offers.",
            )
            .field("overlayOpacity", FieldKind::float(0.0, 1.0), 0.5),

        ComponentType::Text => Entry::new()
            .field(
                "content",
                FieldKind::Text,
                "Enter your text content here. You can customize this paragraph to share your message with your audience.",
            )
            .field("fontSize", FieldKind::int(12, 32), 16_i64)
            .field("textAlign", FieldKind::Choice(ALIGN), "left")
            .field("textColor", FieldKind::Color, "#4a4a4a"),

        ComponentType::Button => Entry::new()
            .field("text", FieldKind::Text, "Click Here")
            .field("url", FieldKind::Text, "https://example.com")
            .field("backgroundColor", FieldKind::Color, "#ffe65f")
            .field("textColor", FieldKind::Color, "#0f172a")
            .field("align", FieldKind::Choice(ALIGN), "center")
            .field("borderRadius", FieldKind::int(0, 24), 6_i64),

        ComponentType::Image => Entry::new()
            .field(
                "url",
                FieldKind::Text,
                "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=600&h=400&fit=crop",
            )
            .field("alt", FieldKind::Text, "Image description")
            .field("width", FieldKind::Choice(IMAGE_WIDTHS), "full")
            .field("align", FieldKind::Choice(ALIGN), "center"),

        ComponentType::Divider => Entry::new()
            .field("color", FieldKind::Color, "#e5e5e5")
            .field("thickness", FieldKind::int(1, 8), 1_i64)
            .field("style", FieldKind::Choice(BORDER_STYLES), "solid"),

        ComponentType::Spacer => Entry::new().field("height", FieldKind::int(8, 120), 32_i64),

        ComponentType::Social => Entry::new()
            .field(
                "platforms",
                FieldKind::Records(PLATFORM_KEYS),
                vec![
                    platform("facebook", "https://facebook.com"),
                    platform("twitter", "https://twitter.com"),
                    platform("instagram", "https://instagram.com"),
                    platform("linkedin", "https://linkedin.com"),
                ],
            )
            .field("iconSize", FieldKind::int(16, 40), 24_i64)
            .field("align", FieldKind::Choice(ALIGN), "center"),

        ComponentType::TwoColumn => Entry::new()
            .field("leftContent", FieldKind::Text, "Left column content goes here.")
            .field("rightContent", FieldKind::Text, "Right column content goes here.")
            .field("gap", FieldKind::int(8, 48), 24_i64),

        ComponentType::Footer => Entry::new()
            .field("companyName", FieldKind::Text, "MMIT")
            .field("address", FieldKind::Text, "1020 Stony Hill Rd, Yardley, PA 19067")
            .field("unsubscribeText", FieldKind::Text, "Unsubscribe from these emails")
            .field("unsubscribeUrl", FieldKind::Text, "#unsubscribe")
            .field("textColor", FieldKind::Color, "#737373")
            .field("backgroundColor", FieldKind::Color, "#f5f5f5"),

        ComponentType::NewsHeader => Entry::new()
            .field(
                "logoUrl",
                FieldKind::Text,
                "https://static.mailjet.com/mjml-website/templates/arturia-logo.png",
            )
            .field("newsText", FieldKind::Text, "NEWS\nMARCH 2016")
            .field("bgColor", FieldKind::Color, "#ffffff"),

        ComponentType::Cta => Entry::new()
            .field("text", FieldKind::Text, "Don't click me!")
            .field("bgColor", FieldKind::Color, "#f45e43")
            .field("textColor", FieldKind::Color, "#ffffff"),

        ComponentType::FeaturesTwo => Entry::new()
            .field("leftTitle", FieldKind::Text, "Easy and quick")
            .field(
                "leftText",
                FieldKind::Text,
                "Write less code, save time and code more efficiently with MJML\u{2019}s semantic syntax.",
            )
            .field("rightTitle", FieldKind::Text, "Responsive")
            .field(
                "rightText",
                FieldKind::Text,
                "MJML is responsive by design on most-popular email clients, even Outlook.",
            ),

        ComponentType::ImageBlock => Entry::new()
            .field(
                "src",
                FieldKind::Text,
                "https://static.mailjet.com/mjml-website/documentation/image.png",
            )
            .field("alt", FieldKind::Text, "")
            .field("width", FieldKind::int(50, 800), 300_i64),

        ComponentType::DataTable => Entry::new()
            .field(
                "rows",
                FieldKind::Table,
                vec![
                    strings(&["1995", "PHP", "C, Shell Unix"]),
                    strings(&["1995", "JavaScript", "Scheme, Self"]),
                ],
            )
            .field("headers", FieldKind::Tokens, strings(&["Year", "Language", "Inspired from"])),

        ComponentType::TitleParagraph => Entry::new()
            .field("title", FieldKind::Text, "Title")
            .field("paragraphs", FieldKind::Lines, strings(&["Paragraph", "Another paragraph"])),

        ComponentType::FeaturesThree => Entry::new().field(
            "items",
            FieldKind::Records(FEATURE_KEYS),
            vec![
                feature(
                    "https://static.mailjet.com/mjml-website/templates/onepage-icon1.png",
                    "Best audience",
                ),
                feature(
                    "https://static.mailjet.com/mjml-website/templates/onepage-icon2.png",
                    "Higher rates",
                ),
                feature(
                    "https://static.mailjet.com/mjml-website/templates/onepage-icon3.png",
                    "24/7 Support",
                ),
            ],
        ),

        ComponentType::Unknown(_) => return None,
    };

    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_catalog_type_is_registered() {
        let registry = Registry::builtin();
        for ty in ComponentType::CATALOG.iter() {
            assert!(registry.contains(ty), "{} missing from registry", ty);
            let defaults = registry.defaults(ty).unwrap();
            for field in registry.fields(ty).unwrap() {
                let value = defaults.get(field.name).unwrap();
                assert!(value.fits(&field.kind), "{}.{} default has wrong kind", ty, field.name);
            }
        }
    }

    #[test]
    fn test_create_instance_copies_defaults() {
        let registry = Registry::builtin();
        let mut ids = IdGenerator::from_seed("test");

        let mut first = registry.create_instance(&ComponentType::Social, &mut ids).unwrap();
        let second = registry.create_instance(&ComponentType::Social, &mut ids).unwrap();

        assert_ne!(first.id(), second.id());

        if let Some(PropValue::Records(platforms)) = first.props_mut().get_mut("platforms") {
            platforms[0].insert("enabled".to_string(), RecordField::Flag(false));
        }

        assert_eq!(second.props().records("platforms")[0]["enabled"], RecordField::Flag(true));
        let defaults = registry.defaults(&ComponentType::Social).unwrap();
        assert_eq!(defaults.records("platforms")[0]["enabled"], RecordField::Flag(true));
    }

    #[test]
    fn test_create_unknown_type_fails() {
        let registry = Registry::builtin();
        let mut ids = IdGenerator::from_seed("test");

        let result = registry.create_instance(&ComponentType::from_tag("countdown"), &mut ids);
        assert_eq!(result, Err(RegistryError::UnknownType("countdown".to_string())));
    }

    #[test]
    fn test_register_is_additive() {
        let mut registry = Registry::empty();
        assert!(!registry.contains(&ComponentType::Spacer));

        registry.register(
            ComponentType::Spacer,
            Entry::new().field("height", FieldKind::int(0, 10), 5_i64),
        );

        let defaults = registry.defaults(&ComponentType::Spacer).unwrap();
        assert_eq!(defaults.int("height"), 5);
        assert!(registry.defaults(&ComponentType::Header).is_err());
    }

    #[test]
    fn test_conform_fills_missing_and_drops_extra() {
        let registry = Registry::builtin();
        let raw = json!({ "height": 64, "color": "red" });

        let props = registry.conform(&ComponentType::Spacer, raw.as_object().unwrap());
        assert_eq!(props.int("height"), 64);
        assert!(!props.contains("color"));

        let bad = json!({ "height": "tall" });
        let props = registry.conform(&ComponentType::Spacer, bad.as_object().unwrap());
        assert_eq!(props.int("height"), 32);
    }

    #[test]
    fn test_conform_clamps_numbers_into_range() {
        let registry = Registry::builtin();

        let low = json!({ "height": -500 });
        let props = registry.conform(&ComponentType::Spacer, low.as_object().unwrap());
        assert_eq!(props.get("height"), Some(&PropValue::Int(8)));

        let high = json!({ "height": 9000.7 });
        let props = registry.conform(&ComponentType::Spacer, high.as_object().unwrap());
        assert_eq!(props.get("height"), Some(&PropValue::Int(120)));

        let opacity = json!({ "overlayOpacity": 7.5 });
        let props = registry.conform(&ComponentType::Hero, opacity.as_object().unwrap());
        assert_eq!(props.get("overlayOpacity"), Some(&PropValue::Float(1.0)));
    }

    #[test]
    fn test_conform_keeps_unknown_type_fields() {
        let registry = Registry::builtin();
        let raw = json!({
            "deadline": "2026-01-01",
            "style": { "color": "red" },
            "note": null,
            "sizes": [1, 2],
            "mixed": [["a"], "b"],
            "tags": ["x", "y"],
            "ratio": 1.5,
            "big": 18446744073709551615u64
        });

        let props = registry.conform(&ComponentType::from_tag("countdown"), raw.as_object().unwrap());
        assert_eq!(props.text("deadline"), "2026-01-01");
        assert_eq!(props.get("style"), Some(&PropValue::Json(json!({ "color": "red" }))));
        assert_eq!(serde_json::to_value(&props).unwrap(), raw);
    }
}
