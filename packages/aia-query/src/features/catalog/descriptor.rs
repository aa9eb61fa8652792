// Component descriptor JSON (simple_components.json shape)
//
// The descriptor encodes most booleans and numbers as strings ("true",
// "7"); `Flag` and `Number` accept either encoding.

use super::component_type::{
    BlockPropertyInfo, ComponentType, EventDecl, MethodDecl, Parameter, PropertyDecl, ReadWrite,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn get(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Number {
    Int(u32),
    Text(String),
}

impl Number {
    fn get(&self) -> Option<u32> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComponentDescriptor {
    name: String,
    #[serde(rename = "type")]
    class_name: String,
    #[serde(default)]
    external: Option<Flag>,
    #[serde(default)]
    version: Option<Number>,
    #[serde(default)]
    category_string: String,
    #[serde(default)]
    help_string: String,
    #[serde(default)]
    show_on_palette: Option<Flag>,
    #[serde(default)]
    non_visible: Option<Flag>,
    #[serde(default)]
    icon_name: Option<String>,
    #[serde(default)]
    properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    block_properties: Vec<BlockPropertyDescriptor>,
    #[serde(default)]
    methods: Vec<MethodDescriptor>,
    #[serde(default)]
    events: Vec<EventDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDescriptor {
    name: String,
    #[serde(default)]
    editor_type: Option<String>,
    #[serde(default)]
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockPropertyDescriptor {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "type")]
    value_type: Option<String>,
    #[serde(default)]
    rw: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    deprecated: Option<Flag>,
}

#[derive(Debug, Deserialize)]
struct ParamDescriptor {
    name: String,
    #[serde(rename = "type")]
    param_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MethodDescriptor {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deprecated: Option<Flag>,
    #[serde(default)]
    params: Vec<ParamDescriptor>,
    #[serde(default)]
    return_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventDescriptor {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deprecated: Option<Flag>,
    #[serde(default)]
    params: Vec<ParamDescriptor>,
}

fn flag(value: &Option<Flag>, default: bool) -> bool {
    value.as_ref().map(Flag::get).unwrap_or(default)
}

fn params(list: Vec<ParamDescriptor>) -> Vec<Parameter> {
    list.into_iter()
        .map(|p| Parameter::new(p.name, p.param_type))
        .collect()
}

impl ComponentDescriptor {
    pub(crate) fn into_component_type(self) -> ComponentType {
        let mut ty = ComponentType::new(self.name, self.class_name)
            .with_category(self.category_string)
            .with_external(flag(&self.external, false))
            .with_visible(!flag(&self.non_visible, false))
            .with_version(self.version.as_ref().and_then(Number::get).unwrap_or(1));
        ty.help = self.help_string;
        ty.show_on_palette = flag(&self.show_on_palette, true);
        ty.icon_name = self.icon_name;

        for prop in self.properties {
            let mut decl = PropertyDecl::new(prop.name);
            decl.editor_type = prop.editor_type;
            decl.default_value = prop.default_value;
            ty = ty.with_property(decl);
        }

        // Block-only properties (no designer editor) still become declarations.
        for prop in self.block_properties {
            let info = BlockPropertyInfo {
                rw: prop
                    .rw
                    .as_deref()
                    .and_then(ReadWrite::parse)
                    .unwrap_or(ReadWrite::ReadWrite),
                value_type: prop.value_type,
                category: prop.category,
                description: prop.description,
                deprecated: flag(&prop.deprecated, false),
            };
            match ty.properties.get_mut(&prop.name) {
                Some(decl) => decl.block = Some(info),
                None => ty = ty.with_property(PropertyDecl::new(prop.name).with_block_info(info)),
            }
        }

        for m in self.methods {
            let mut decl = MethodDecl::new(m.name);
            decl.description = m.description;
            decl.deprecated = flag(&m.deprecated, false);
            decl.params = params(m.params);
            decl.return_type = m.return_type.filter(|t| !t.is_empty());
            ty = ty.with_method(decl);
        }

        for e in self.events {
            let mut decl = EventDecl::new(e.name);
            decl.description = e.description;
            decl.deprecated = flag(&e.deprecated, false);
            decl.params = params(e.params);
            ty = ty.with_event(decl);
        }

        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: &str = r#"{
        "name": "Button",
        "version": "7",
        "type": "com.google.appinventor.components.runtime.Button",
        "external": "false",
        "categoryString": "USERINTERFACE",
        "helpString": "Button with the ability to detect clicks.",
        "showOnPalette": "true",
        "nonVisible": "false",
        "iconName": "images/button.png",
        "properties": [
            {"name": "Text", "editorType": "textArea", "defaultValue": "Text for Button"},
            {"name": "Enabled", "editorType": "boolean", "defaultValue": "True"}
        ],
        "blockProperties": [
            {"name": "Text", "description": "Text to display", "type": "text", "rw": "read-write", "deprecated": "false"},
            {"name": "Image", "description": "Image to display", "type": "text", "rw": "read-write", "deprecated": "false"}
        ],
        "events": [
            {"name": "Click", "description": "User tapped and released the button.", "deprecated": "false", "params": []},
            {"name": "LongClick", "description": "User held the button down.", "deprecated": "false", "params": []}
        ],
        "methods": []
    }"#;

    #[test]
    fn test_descriptor_conversion() {
        let descriptor: ComponentDescriptor = serde_json::from_str(BUTTON).unwrap();
        let ty = descriptor.into_component_type();

        assert_eq!(ty.name, "Button");
        assert_eq!(ty.version, 7);
        assert!(!ty.external);
        assert!(ty.visible);
        assert!(!ty.container);
        assert_eq!(ty.category, "USERINTERFACE");
        assert_eq!(ty.icon_name.as_deref(), Some("images/button.png"));
        assert_eq!(ty.events.len(), 2);

        let text = ty.property("Text").unwrap();
        assert_eq!(text.default_value.as_deref(), Some("Text for Button"));
        assert_eq!(text.block.as_ref().unwrap().rw, ReadWrite::ReadWrite);

        let image = ty.property("Image").unwrap();
        assert!(image.editor_type.is_none());
        assert!(image.block.is_some());
    }

    #[test]
    fn test_native_json_booleans_accepted() {
        let json = r#"{"name": "Clock", "type": "x.Clock", "nonVisible": true, "version": 4,
                       "methods": [{"name": "Now", "params": [], "returnType": "InstantInTime"}]}"#;
        let ty = serde_json::from_str::<ComponentDescriptor>(json)
            .unwrap()
            .into_component_type();
        assert!(!ty.visible);
        assert_eq!(ty.version, 4);
        assert!(ty.method("Now").unwrap().returns_value());
    }
}
