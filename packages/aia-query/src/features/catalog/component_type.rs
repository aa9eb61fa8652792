//! Component types as declared by the component descriptor
//!
//! A `ComponentType` is built once (by hand or from descriptor JSON) and then
//! shared by `Arc` between the catalog and every component instance. Type
//! identity is pointer identity of that `Arc`.

use indexmap::IndexMap;
use serde::Serialize;

/// Designer types that can hold child components.
pub const CONTAINER_TYPES: &[&str] = &[
    "Canvas",
    "Chart",
    "FeatureCollection",
    "Form",
    "HorizontalArrangement",
    "HorizontalScrollArrangement",
    "Map",
    "TableArrangement",
    "VerticalArrangement",
    "VerticalScrollArrangement",
];

/// Read/write mode of a block-visible property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadWrite {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    Invisible,
}

impl ReadWrite {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read-only" => Some(Self::ReadOnly),
            "write-only" => Some(Self::WriteOnly),
            "read-write" => Some(Self::ReadWrite),
            "invisible" => Some(Self::Invisible),
            _ => None,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }
}

/// How a property appears in the blocks editor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockPropertyInfo {
    pub rw: ReadWrite,
    pub value_type: Option<String>,
    pub category: Option<String>,
    pub description: String,
    pub deprecated: bool,
}

/// A designer property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub editor_type: Option<String>,
    pub default_value: Option<String>,
    pub block: Option<BlockPropertyInfo>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editor_type: None,
            default_value: None,
            block: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_editor(mut self, editor_type: impl Into<String>) -> Self {
        self.editor_type = Some(editor_type.into());
        self
    }

    pub fn with_block_info(mut self, info: BlockPropertyInfo) -> Self {
        self.block = Some(info);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub description: String,
    pub deprecated: bool,
    pub params: Vec<Parameter>,
    /// `None` for statement methods
    pub return_type: Option<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            deprecated: false,
            params: Vec::new(),
            return_type: None,
        }
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns_value(&self) -> bool {
        self.return_type.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDecl {
    pub name: String,
    pub description: String,
    pub deprecated: bool,
    pub params: Vec<Parameter>,
}

impl EventDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            deprecated: false,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }
}

/// A designer component type (Button, Form, HorizontalArrangement, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentType {
    pub name: String,
    /// Fully qualified implementation class
    pub class_name: String,
    pub external: bool,
    pub version: u32,
    pub category: String,
    pub help: String,
    pub show_on_palette: bool,
    pub visible: bool,
    pub container: bool,
    pub icon_name: Option<String>,
    pub properties: IndexMap<String, PropertyDecl>,
    pub methods: IndexMap<String, MethodDecl>,
    pub events: IndexMap<String, EventDecl>,
}

impl ComponentType {
    /// Bare type; `container` follows the designer's container list.
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        let name = name.into();
        let container = CONTAINER_TYPES.contains(&name.as_str());
        Self {
            name,
            class_name: class_name.into(),
            external: false,
            version: 1,
            category: String::new(),
            help: String::new(),
            show_on_palette: true,
            visible: true,
            container,
            icon_name: None,
            properties: IndexMap::new(),
            methods: IndexMap::new(),
            events: IndexMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_container(mut self, container: bool) -> Self {
        self.container = container;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.insert(property.name.clone(), property);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    pub fn with_event(mut self, event: EventDecl) -> Self {
        self.events.insert(event.name.clone(), event);
        self
    }

    pub fn is_container(&self) -> bool {
        self.container
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.get(name)
    }

    pub fn event(&self, name: &str) -> Option<&EventDecl> {
        self.events.get(name)
    }
}
