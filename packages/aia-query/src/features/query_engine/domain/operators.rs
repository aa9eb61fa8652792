// Domain: Operator overloading for fluent filters
// Enables syntax: A::leaf() & !A::disabled() | A::depth().ge(3)

use super::expression::Expr;
use super::factories::AttrHandle;
use std::ops::{BitAnd, BitOr, Not};

// ============================================================================
// & operator: Conjunction
// ============================================================================

impl<R: Into<Expr>> BitAnd<R> for Expr {
    type Output = Expr;

    /// Example: A::depth().gt(2) & A::leaf()
    fn bitand(self, rhs: R) -> Expr {
        self.and(rhs)
    }
}

impl<R: Into<Expr>> BitAnd<R> for AttrHandle {
    type Output = Expr;

    fn bitand(self, rhs: R) -> Expr {
        Expr::from(self).and(rhs)
    }
}

// ============================================================================
// | operator: Disjunction
// ============================================================================

impl<R: Into<Expr>> BitOr<R> for Expr {
    type Output = Expr;

    /// Example: A::event_name().eq("Click") | A::event_name().eq("LongClick")
    fn bitor(self, rhs: R) -> Expr {
        self.or(rhs)
    }
}

impl<R: Into<Expr>> BitOr<R> for AttrHandle {
    type Output = Expr;

    fn bitor(self, rhs: R) -> Expr {
        Expr::from(self).or(rhs)
    }
}

// ============================================================================
// ! operator: Negation
// ============================================================================

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.negate()
    }
}

impl Not for AttrHandle {
    type Output = Expr;

    /// `!A::leaf()` is "has children"
    fn not(self) -> Expr {
        Expr::from(self).negate()
    }
}
