// Attribute values and literals
//
// Equality is lenient across kinds (a type equals its name, 2 == 2.0, any
// other cross-kind pair is simply unequal); ordering is strict and fails with
// TypeMismatch for incomparable kinds.

use crate::errors::{QueryError, Result};
use crate::features::catalog::{BlockType, ComponentType};
use crate::features::entity_model::EntityKey;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Catalog type constant, compared by identity
#[derive(Debug, Clone)]
pub enum TypeRef {
    Component(Arc<ComponentType>),
    Block(Arc<BlockType>),
}

impl TypeRef {
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Component(ty) => &ty.name,
            TypeRef::Block(ty) => &ty.name,
        }
    }

    fn address(&self) -> usize {
        match self {
            TypeRef::Component(ty) => Arc::as_ptr(ty) as usize,
            TypeRef::Block(ty) => Arc::as_ptr(ty) as usize,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeRef::Component(a), TypeRef::Component(b)) => Arc::ptr_eq(a, b),
            (TypeRef::Block(a), TypeRef::Block(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value produced by attribute resolution or written as a literal
#[derive(Debug, Clone, Serialize)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    List(Vec<Value>),
    Type(TypeRef),
    Entity(EntityKey),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Type(_) => "type",
            Value::Entity(_) => "entity",
        }
    }

    /// Truthiness of a bare attribute used as a filter.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::List(items) => !items.is_empty(),
            Value::Type(_) | Value::Entity(_) => true,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Type(t) => Some(t.name()),
            _ => None,
        }
    }

    /// Lenient equality used by `==` / `!=` filters.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Type(t), Value::String(s)) | (Value::String(s), Value::Type(t)) => t.name() == s,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => self == other,
        }
    }

    /// Strict ordering used by `<`, `<=`, `>`, `>=`, min and max.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering> {
        let ordering = match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        };
        ordering.ok_or_else(|| {
            QueryError::type_mismatch(format!(
                "cannot order {} against {}",
                self.kind_name(),
                other.kind_name()
            ))
        })
    }
}

/// Structural equality; floats compare by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits() || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Entity(a), Value::Entity(b)) => a == b,
            _ => false,
        }
    }
}

// Needed for group-by keys. NaN equals itself through the bit comparison
// above, and 0.0 / -0.0 hash alike.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(i) => i.hash(state),
            Value::Float(f) => {
                let normalized = if *f == 0.0 { 0.0f64 } else { *f };
                normalized.to_bits().hash(state)
            }
            Value::String(s) => s.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::List(items) => items.hash(state),
            Value::Type(t) => t.hash(state),
            Value::Entity(k) => k.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Type(t) => write!(f, "{t}"),
            Value::Entity(k) => write!(f, "<{k}>"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<TypeRef> for Value {
    fn from(v: TypeRef) -> Self {
        Value::Type(v)
    }
}

impl From<Arc<ComponentType>> for Value {
    fn from(v: Arc<ComponentType>) -> Self {
        Value::Type(TypeRef::Component(v))
    }
}

impl From<&Arc<ComponentType>> for Value {
    fn from(v: &Arc<ComponentType>) -> Self {
        Value::Type(TypeRef::Component(Arc::clone(v)))
    }
}

impl From<Arc<BlockType>> for Value {
    fn from(v: Arc<BlockType>) -> Self {
        Value::Type(TypeRef::Block(v))
    }
}

impl From<&Arc<BlockType>> for Value {
    fn from(v: &Arc<BlockType>) -> Self {
        Value::Type(TypeRef::Block(Arc::clone(v)))
    }
}

impl From<EntityKey> for Value {
    fn from(v: EntityKey) -> Self {
        Value::Entity(v)
    }
}
