use crate::features::catalog::ComponentType;
use indexmap::IndexMap;
use std::sync::Arc;

/// A designer component instance
///
/// Parent and children are held as designer names and resolved through the
/// owning [`super::Screen`].
#[derive(Debug, Clone)]
pub struct Component {
    pub(crate) name: String,
    pub(crate) uuid: String,
    pub(crate) component_type: Arc<ComponentType>,
    pub(crate) properties: IndexMap<String, String>,
    pub(crate) parent: Option<String>,
    pub(crate) children: Vec<String>,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn component_type(&self) -> &Arc<ComponentType> {
        &self.component_type
    }

    /// Explicitly set properties only; catalog defaults are not merged in.
    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    /// Instance value, falling back to the declared default.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(String::as_str)
            .or_else(|| {
                self.component_type
                    .property(name)
                    .and_then(|decl| decl.default_value.as_deref())
            })
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn child_names(&self) -> &[String] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_container(&self) -> bool {
        self.component_type.is_container()
    }
}
