// Domain: filter DSL - pure domain logic
// Values, attribute names, expression trees and their evaluator.

pub mod attribute;
pub mod expression;
pub mod factories;
pub mod operators;
pub mod value;

// Re-export for public API
pub use attribute::{Attribute, AttributeSlot, NAMED_MUTATIONS};
pub use expression::{CmpOp, Expr, ExprEvaluator, Resolve};
pub use factories::{AttrHandle, A};
pub use value::{TypeRef, Value};
