// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! A minimal stand-in for the host Avail type system.
//!
//! `spec.md` is explicit that "the general Avail object model" is an
//! external collaborator, out of scope for the splitter (§1), and that the
//! signature checker and type-directed emitter only ever need one thing from
//! it: "what is the subexpressions-tuple-type of this phrase type?" (§9). This
//! module implements exactly that contract and nothing more: a small closed
//! [`Type`] enum covering the handful of shapes `checkType` (§4.3) and
//! `emitOn` (§4.5) actually branch on (bottom, boolean, whole number, integer
//! range, and tuples), deliberately *not* a general-purpose type lattice.
//!
//! Following the spec's own language ("a tuple type, or a phrase type
//! interpreted as such"), this model does not separate "argument type" from
//! "phrase type" the way the real Avail object model does: `Type::Tuple` and
//! `Type::ListPhrase` share the same [`TupleShape`] payload, and
//! [`Type::subexpressions_tuple_type`] is the single helper both the checker
//! and the emitter call through (see `spec.md` §9, "Phrase-type
//! destructuring").

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive-minimum, optionally-unbounded-maximum size range, used both
/// for a tuple type's own size and for a repetition's cardinality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    /// `None` means unbounded (the Avail `∞` upper bound).
    pub max: Option<usize>,
}

impl SizeRange {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// Is every value allowed by `self` also allowed by `bound`?
    pub fn is_subtype_of(&self, bound: &SizeRange) -> bool {
        if self.min < bound.min {
            return false;
        }
        match (self.max, bound.max) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => a <= b,
        }
    }

    /// `true` if this range names a single exact size.
    pub fn exact(&self) -> Option<usize> {
        match self.max {
            Some(m) if m == self.min => Some(m),
            _ => None,
        }
    }
}

/// The shape of a tuple type (or, equivalently, a list-phrase type's
/// subexpressions tuple type): a size range, the leading/"variation" element
/// types (§9 Glossary, "Variation"), and the type shared by every element
/// beyond the variation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleShape {
    pub size: SizeRange,
    pub leading: Vec<Type>,
    pub default_element: Box<Type>,
}

impl TupleShape {
    /// A fixed-size tuple shape with exactly these element types.
    pub fn fixed(types: Vec<Type>) -> Self {
        let size = SizeRange::exactly(types.len());
        Self { size, leading: types, default_element: Box::new(Type::Bottom) }
    }

    /// A homogeneous, possibly-repeated tuple shape: `size` repetitions of
    /// `element`, with no distinguished leading/variation prefix.
    pub fn homogeneous(size: SizeRange, element: Type) -> Self {
        Self { size, leading: Vec::new(), default_element: Box::new(element) }
    }

    /// A homogeneous shape with a distinguished leading/"variation" prefix of
    /// individually-typed elements, used to let the emitter unroll the first
    /// few repetitions of a group against more specific element types.
    pub fn with_variation(size: SizeRange, leading: Vec<Type>, default_element: Type) -> Self {
        Self { size, leading, default_element: Box::new(default_element) }
    }

    /// The one-based element type at `index`, falling back to
    /// `default_element` once past the variation prefix.
    pub fn element_type(&self, index: usize) -> &Type {
        self.leading.get(index.saturating_sub(1)).unwrap_or(&self.default_element)
    }

    /// Length of the distinguished leading/"variation" prefix.
    pub fn variation_len(&self) -> usize {
        self.leading.len()
    }
}

/// A type, doubling as a phrase type per the spec's own conflation of the
/// two (§4.3: "a tuple/phrase type"). See the module doc comment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// The bottom type, `⊥`: never a legal argument type (§4.3).
    Bottom,
    /// The universal type, `any`: always a legal argument type.
    Any,
    Boolean,
    WholeNumber,
    /// An inclusive integer range `[low, high]`.
    IntegerRange(i64, i64),
    /// A plain tuple *value* type.
    Tuple(TupleShape),
    /// The type of what parsing a list-shaped phrase (`Sequence`, `Group`,
    /// `Counter`, `NumberedChoice`, ...) yields.
    ListPhrase(TupleShape),
}

impl Type {
    pub fn is_bottom(&self) -> bool {
        matches!(self, Type::Bottom)
    }

    pub fn as_tuple_shape(&self) -> Option<&TupleShape> {
        match self {
            Type::Tuple(s) | Type::ListPhrase(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_whole_number(&self) -> bool {
        match self {
            Type::WholeNumber => true,
            Type::IntegerRange(low, _) => *low >= 0,
            _ => false,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Boolean)
    }

    /// Is this type a subtype of the inclusive integer range `[low, high]`?
    pub fn is_subrange_of(&self, low: i64, high: i64) -> bool {
        matches!(self, Type::IntegerRange(l, h) if *l >= low && *h <= high)
    }

    /// The "subexpressions-tuple-type of this phrase type" helper from §9:
    /// if `self` is already a list-phrase type, its subexpressions tuple type
    /// is itself; otherwise synthesize one by treating `self`'s own yielded
    /// type as a single-element tuple (used for emitting the body of a
    /// `CompletelyOptional`/`CaseInsensitive` wrapper around a non-list
    /// child, and as the base case for degenerate single-argument recursion).
    pub fn subexpressions_tuple_type(&self) -> TupleShape {
        match self {
            Type::ListPhrase(shape) | Type::Tuple(shape) => shape.clone(),
            other => TupleShape::fixed(vec![other.clone()]),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bottom => write!(f, "⊥"),
            Type::Any => write!(f, "any"),
            Type::Boolean => write!(f, "boolean"),
            Type::WholeNumber => write!(f, "whole number"),
            Type::IntegerRange(low, high) => write!(f, "[{low}..{high}]"),
            Type::Tuple(shape) => write!(f, "tuple{}", fmt_shape(shape)),
            Type::ListPhrase(shape) => write!(f, "list phrase{}", fmt_shape(shape)),
        }
    }
}

fn fmt_shape(shape: &TupleShape) -> String {
    match shape.size.exact() {
        Some(n) => format!("({n})"),
        None => format!("({}..{})", shape.size.min, shape.size.max.map(|m| m.to_string()).unwrap_or_else(|| "∞".into())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_range_subtype() {
        assert!(SizeRange::exactly(3).is_subtype_of(&SizeRange::between(0, 5)));
        assert!(!SizeRange::between(0, 10).is_subtype_of(&SizeRange::between(0, 5)));
        assert!(SizeRange::between(2, 4).is_subtype_of(&SizeRange::at_least(1)));
    }

    #[test]
    fn element_type_falls_back_to_default() {
        let shape = TupleShape::with_variation(SizeRange::at_least(0), vec![Type::Boolean], Type::WholeNumber);
        assert_eq!(shape.element_type(1), &Type::Boolean);
        assert_eq!(shape.element_type(2), &Type::WholeNumber);
        assert_eq!(shape.element_type(99), &Type::WholeNumber);
    }

    #[test]
    fn subexpressions_tuple_type_of_non_list_is_single_element() {
        let t = Type::Boolean;
        let shape = t.subexpressions_tuple_type();
        assert_eq!(shape.size, SizeRange::exactly(1));
        assert_eq!(shape.element_type(1), &Type::Boolean);
    }
}
