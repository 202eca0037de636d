//! Condition backend seam
//!
//! The builder never looks inside a condition. It asks a
//! [`ConditionBackend`] to turn each primitive comparison into a condition
//! and to join conditions, and hands the result back to the caller.

use qcond_operators::Comparison;

/// Produces and combines backend-native conditions
pub trait ConditionBackend {
    /// Opaque condition value
    type Condition;

    /// Backend-native rendering of a condition
    type Rendered;

    /// Turn one primitive comparison into a condition
    fn compare(&self, comparison: Comparison) -> Self::Condition;

    /// Join two conditions with AND
    fn and(&self, left: Self::Condition, right: Self::Condition) -> Self::Condition;

    /// Join two conditions with OR
    fn or(&self, left: Self::Condition, right: Self::Condition) -> Self::Condition;

    /// Render a condition for the layer that executes it
    fn render(&self, condition: &Self::Condition) -> Self::Rendered;
}

impl<B: ConditionBackend + ?Sized> ConditionBackend for &B {
    type Condition = B::Condition;
    type Rendered = B::Rendered;

    fn compare(&self, comparison: Comparison) -> Self::Condition {
        (**self).compare(comparison)
    }

    fn and(&self, left: Self::Condition, right: Self::Condition) -> Self::Condition {
        (**self).and(left, right)
    }

    fn or(&self, left: Self::Condition, right: Self::Condition) -> Self::Condition {
        (**self).or(left, right)
    }

    fn render(&self, condition: &Self::Condition) -> Self::Rendered {
        (**self).render(condition)
    }
}
