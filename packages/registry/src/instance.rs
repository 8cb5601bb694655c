//! A placed, configured block in a document.

use crate::{ComponentType, Props, Registry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One component instance: stable id, immutable type, owned properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersistedInstance")]
pub struct ComponentInstance {
    id: String,
    #[serde(rename = "type")]
    ty: ComponentType,
    props: Props,
}

impl ComponentInstance {
    pub fn new(id: impl Into<String>, ty: ComponentType, props: Props) -> Self {
        Self {
            id: id.into(),
            ty,
            props,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.ty
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Mutable access to the properties. Writers are responsible for keeping
    /// the field set and value kinds within the type's schema.
    pub fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }
}

/// Wire form of an instance, before its props are checked against the schema
#[derive(Deserialize)]
struct PersistedInstance {
    id: String,
    #[serde(rename = "type")]
    ty: ComponentType,
    #[serde(default)]
    props: Map<String, Value>,
}

impl From<PersistedInstance> for ComponentInstance {
    fn from(raw: PersistedInstance) -> Self {
        let props = Registry::builtin().conform(&raw.ty, &raw.props);
        ComponentInstance::new(raw.id, raw.ty, props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_persisted_shape() {
        let mut ids = IdGenerator::from_seed("s");
        let instance = Registry::builtin()
            .create_instance(&ComponentType::Spacer, &mut ids)
            .unwrap();

        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(
            json,
            json!({ "id": "comp_s-1", "type": "spacer", "props": { "height": 32 } })
        );
    }

    #[test]
    fn test_round_trip_preserves_instance() {
        let mut ids = IdGenerator::from_seed("s");
        let registry = Registry::builtin();

        for ty in ComponentType::CATALOG.iter() {
            let instance = registry.create_instance(ty, &mut ids).unwrap();
            let json = serde_json::to_string(&instance).unwrap();
            let back: ComponentInstance = serde_json::from_str(&json).unwrap();
            assert_eq!(back, instance, "{} did not survive a round trip", ty);
        }
    }

    #[test]
    fn test_unknown_type_survives_round_trip() {
        let json = json!({ "id": "x", "type": "countdown", "props": { "deadline": "soon" } });

        let instance: ComponentInstance = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(instance.component_type(), &ComponentType::Unknown("countdown".to_string()));
        assert_eq!(serde_json::to_value(&instance).unwrap(), json);
    }

    #[test]
    fn test_unknown_type_keeps_untyped_props() {
        let json = json!({
            "id": "x",
            "type": "countdown",
            "props": {
                "deadline": "soon",
                "style": { "color": "red" },
                "note": null,
                "sizes": [1, 2]
            }
        });

        let instance: ComponentInstance = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(instance.props().len(), 4);
        assert_eq!(serde_json::to_value(&instance).unwrap(), json);
    }
}
