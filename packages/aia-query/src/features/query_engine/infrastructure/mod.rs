// Infrastructure: Query execution components

pub mod attribute_resolver;
pub mod caller_index;
pub mod traversal;

pub use attribute_resolver::{AttributeResolver, ResolverEnv};
pub use caller_index::CallerIndex;
pub use traversal::{DepthIndex, Descendants, PrunedDescendants, TraversalOrder};
