//! # Component Types
//!
//! The closed set of block kinds a document can hold. Tags use the kebab-case
//! wire names that appear in persisted templates (`two-column`, `news-header`).
//!
//! A persisted document may name a tag this build does not know about. Such a
//! tag is kept verbatim as [`ComponentType::Unknown`] so the document survives a
//! load/save cycle unchanged; it renders as nothing and cannot be instantiated.

use crate::RegistryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Header,
    Hero,
    Text,
    Button,
    Image,
    Divider,
    Spacer,
    Social,
    TwoColumn,
    Footer,
    NewsHeader,
    Cta,
    FeaturesTwo,
    ImageBlock,
    DataTable,
    TitleParagraph,
    FeaturesThree,
    /// A tag from a persisted document that is not in the catalog
    Unknown(String),
}

impl ComponentType {
    /// Every instantiable type, in palette order
    pub const CATALOG: [ComponentType; 17] = [
        ComponentType::Header,
        ComponentType::Hero,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Divider,
        ComponentType::Spacer,
        ComponentType::Social,
        ComponentType::TwoColumn,
        ComponentType::Footer,
        ComponentType::NewsHeader,
        ComponentType::Cta,
        ComponentType::FeaturesTwo,
        ComponentType::ImageBlock,
        ComponentType::DataTable,
        ComponentType::TitleParagraph,
        ComponentType::FeaturesThree,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &str {
        match self {
            ComponentType::Header => "header",
            ComponentType::Hero => "hero",
            ComponentType::Text => "text",
            ComponentType::Button => "button",
            ComponentType::Image => "image",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Social => "social",
            ComponentType::TwoColumn => "two-column",
            ComponentType::Footer => "footer",
            ComponentType::NewsHeader => "news-header",
            ComponentType::Cta => "cta",
            ComponentType::FeaturesTwo => "features-two",
            ComponentType::ImageBlock => "image-block",
            ComponentType::DataTable => "data-table",
            ComponentType::TitleParagraph => "title-paragraph",
            ComponentType::FeaturesThree => "features-three",
            ComponentType::Unknown(tag) => tag,
        }
    }

    /// Lenient parse: catalog tags map to their variant, anything else is kept
    /// as `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        Self::CATALOG
            .iter()
            .find(|ty| ty.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| ComponentType::Unknown(tag.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ComponentType::Unknown(_))
    }

    /// Human-facing name: the tag with its first character upper-cased
    /// (`two-column` becomes `Two-column`).
    pub fn display_name(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = RegistryError;

    /// Strict parse, for input that must name a catalog type
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_tag(s) {
            ComponentType::Unknown(tag) => Err(RegistryError::UnknownType(tag)),
            ty => Ok(ty),
        }
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ComponentType::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for ty in ComponentType::CATALOG.iter() {
            assert_eq!(&ComponentType::from_tag(ty.as_str()), ty);
            assert!(ty.is_known());
        }
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let ty = ComponentType::from_tag("countdown");
        assert_eq!(ty, ComponentType::Unknown("countdown".to_string()));
        assert_eq!(ty.as_str(), "countdown");
        assert!(!ty.is_known());
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert_eq!("cta".parse::<ComponentType>(), Ok(ComponentType::Cta));
        assert_eq!(
            "countdown".parse::<ComponentType>(),
            Err(RegistryError::UnknownType("countdown".to_string()))
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ComponentType::Header.display_name(), "Header");
        assert_eq!(ComponentType::TwoColumn.display_name(), "Two-column");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ComponentType::ImageBlock).unwrap();
        assert_eq!(json, "\"image-block\"");

        let ty: ComponentType = serde_json::from_str("\"features-three\"").unwrap();
        assert_eq!(ty, ComponentType::FeaturesThree);
    }
}
