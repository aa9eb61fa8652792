use crate::features::catalog::BlockType;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// A name one block declares and other blocks refer to
///
/// Component keys are the instance name, or `any <Type>` for generic blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    Procedure(String),
    GlobalVariable(String),
    Method { component: String, method: String },
    Property { component: String, property: String },
}

/// A blocks-editor block
///
/// `declares` and `references` are derived by the screen builder from the
/// block type, fields and mutation.
#[derive(Debug, Clone)]
pub struct Block {
    pub(crate) id: String,
    pub(crate) block_type: Arc<BlockType>,
    pub(crate) mutators: Vec<String>,
    pub(crate) mutation: IndexMap<String, String>,
    pub(crate) fields: IndexMap<String, String>,
    pub(crate) parent: Option<String>,
    pub(crate) children: Vec<String>,
    pub(crate) component: Option<String>,
    pub(crate) declares: Option<Reference>,
    pub(crate) references: Option<Reference>,
    pub(crate) disabled: bool,
    pub(crate) comment: Option<String>,
    pub(crate) position: Option<(f64, f64)>,
}

impl Block {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn block_type(&self) -> &Arc<BlockType> {
        &self.block_type
    }

    pub fn mutators(&self) -> &[String] {
        &self.mutators
    }

    pub fn mutation(&self, key: &str) -> Option<&str> {
        self.mutation.get(key).map(String::as_str)
    }

    pub fn mutation_attributes(&self) -> &IndexMap<String, String> {
        &self.mutation
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn child_ids(&self) -> &[String] {
        &self.children
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Designer name of the component this block operates on.
    pub fn component_name(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn declares(&self) -> Option<&Reference> {
        self.declares.as_ref()
    }

    pub fn references(&self) -> Option<&Reference> {
        self.references.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_generic(&self) -> bool {
        self.mutation("is_generic") == Some("true")
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    /// Component key used in method/property references.
    pub(crate) fn component_key(&self) -> Option<String> {
        if self.is_generic() {
            self.mutation("component_type").map(|ty| format!("any {ty}"))
        } else {
            self.mutation("instance_name").map(str::to_string)
        }
    }

    /// Compute the names this block declares and refers to.
    pub(crate) fn derive_references(&self) -> (Option<Reference>, Option<Reference>) {
        let ty = &self.block_type;
        match ty.name.as_str() {
            _ if ty.is_procedure_definition() => (
                self.field("NAME").map(|n| Reference::Procedure(n.to_string())),
                None,
            ),
            _ if ty.is_procedure_call() => (
                None,
                self.field("PROCNAME").map(|n| Reference::Procedure(n.to_string())),
            ),
            "global_declaration" => (
                self.field("NAME").map(|n| Reference::GlobalVariable(n.to_string())),
                None,
            ),
            "lexical_variable_get" | "lexical_variable_set" => (
                None,
                self.field("VAR")
                    .and_then(|v| v.strip_prefix("global "))
                    .map(|n| Reference::GlobalVariable(n.to_string())),
            ),
            "component_method" => {
                let method = self
                    .component_key()
                    .zip(self.mutation("method_name"))
                    .map(|(component, m)| Reference::Method {
                        component,
                        method: m.to_string(),
                    });
                (method.clone(), method)
            }
            "component_set_get" => {
                let property = self
                    .component_key()
                    .zip(self.mutation("property_name"))
                    .map(|(component, p)| Reference::Property {
                        component,
                        property: p.to_string(),
                    });
                (property.clone(), property)
            }
            _ => (None, None),
        }
    }
}
