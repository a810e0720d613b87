// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use super::Sequence;
use crate::ordinal::NO_ORDINAL;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};

/// A repeatable group, `«...»` (§3, `Group(beforeDagger, afterDagger,
/// hasDagger?, maximumCardinality)`), and also the payload of the `Counter`
/// variant (`«...»#`, §3), which reuses this struct since a counter is just a
/// group whose repetitions must not yield any value.
///
/// `beforeDagger`/`afterDagger` split the group's body around a `‡` marker
/// (§3's "double dagger", §6's `INCORRECT_USE_OF_DOUBLE_DAGGER`): the second
/// half repeats only up to the second-to-last iteration (§9, "Double dagger
/// semantics").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub before_dagger: Sequence,
    pub after_dagger: Sequence,
    pub has_dagger: bool,
    /// Position of the `‡` marker, meaningless unless `has_dagger`.
    pub dagger_position: Position,
    /// Upper bound on repetitions from a trailing `…^n` octothorp-style
    /// cardinality restriction, or `None` if unbounded (§3 invariant 5,
    /// §6 `EXPECTED_A_CLOSE_GUILLEMET`-adjacent cardinality syntax).
    pub maximum_cardinality: Option<u32>,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl Group {
    pub fn new(position: Position) -> Self {
        Self {
            before_dagger: Sequence::new(position),
            after_dagger: Sequence::new(position),
            has_dagger: false,
            dagger_position: Position::NONE,
            maximum_cardinality: None,
            position,
            explicit_ordinal: NO_ORDINAL,
        }
    }

    /// Total underscore count across both dagger halves (§3 invariant 4:
    /// a `Counter`'s body must have none at all; a plain simple `Group`'s
    /// body must have exactly one, checked by the parser as it closes the
    /// group rather than here).
    pub fn underscore_count(&self) -> usize {
        self.before_dagger.expressions.iter().map(super::Expression::underscore_count).sum::<usize>()
            + self.after_dagger.expressions.iter().map(super::Expression::underscore_count).sum::<usize>()
    }

    /// `true` for a group whose argument shape is a single before-dagger
    /// hole and no after-dagger hole at all (§4.3/§4.5 "a single before-dagger
    /// argument and no after-dagger argument"; §9 Glossary: double-wrapping is
    /// required only once a group's argument shape "has more than one hole or
    /// uses the dagger"). Literal parts alongside the one hole (`«_,»`, §8
    /// scenario A) do not disqualify it — only the *argument* count matters,
    /// not the child count.
    pub fn is_simple(&self) -> bool {
        !self.has_dagger && self.before_dagger.argument_count() == 1 && self.after_dagger.argument_count() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_group_is_simple() {
        use crate::expression::{ArgumentExpr, ArgumentKind, Expression};

        let mut g = Group::new(Position(1));
        g.before_dagger.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(2))));
        assert!(g.is_simple());
        assert_eq!(g.underscore_count(), 1);
    }

    #[test]
    fn group_with_dagger_is_not_simple() {
        use crate::expression::{ArgumentExpr, ArgumentKind, Expression};

        let mut g = Group::new(Position(1));
        g.before_dagger.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(2))));
        g.has_dagger = true;
        g.dagger_position = Position(3);
        assert!(!g.is_simple());
        assert_eq!(g.underscore_count(), 1);
    }

    #[test]
    fn single_argument_with_literal_parts_is_still_simple() {
        use crate::expression::{ArgumentExpr, ArgumentKind, Expression, Simple};

        // `«_,»` (spec.md §8 scenario A): one hole plus a literal comma, no
        // dagger. Only the argument count disqualifies simplicity, not the
        // presence of literal siblings.
        let mut g = Group::new(Position(1));
        g.before_dagger.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(2))));
        g.before_dagger.push(Expression::Simple(Simple::new(0, Position(3))));
        assert!(g.is_simple());
        assert_eq!(g.underscore_count(), 1);
    }
}
