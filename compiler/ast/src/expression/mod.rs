// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Expression tree: the typed variant tree modelling a message name's
//! embedded grammar (`spec.md` §3 "Expression (sum type)").
//!
//! Each variant is its own small struct in its own module, the way
//! `leo_ast::Expression` wraps one struct per expression kind; the enum here
//! plays the same dispatching role `leo_ast`'s `Node` trait plays for spans,
//! but for the splitter-specific operations the spec names:
//! `canBeReordered`, `underscoreCount`, and the sanity-check invariants from
//! §3. `checkType` and `emitOn` are *not* implemented here — they belong to
//! the passes crate, which depends on this one (see
//! `avail_splitter_passes::signature_checker` and
//! `avail_splitter_passes::code_generation`), mirroring how `leo-passes`
//! depends on `leo-ast` rather than the reverse.

mod alternation;
mod case_insensitive;
mod group;
mod leaf;
mod optional;
mod sequence;

pub use alternation::{Alternation, NumberedChoice};
pub use case_insensitive::CaseInsensitive;
pub use group::Group;
pub use leaf::{ArgumentExpr, ArgumentKind, RawTokenExpr, RawTokenKind, SectionCheckpoint, Simple};
pub use optional::{CompletelyOptional, Optional};
pub use sequence::Sequence;

use crate::ordinal::NO_ORDINAL;
use avail_splitter_errors::{MalformedMessage, Result};
use avail_splitter_span::Position;

/// A node of the name's grammar tree (`spec.md` §3).
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Simple(Simple),
    Argument(ArgumentExpr),
    RawToken(RawTokenExpr),
    Sequence(Sequence),
    Group(Group),
    Counter(Group),
    Optional(Optional),
    CompletelyOptional(CompletelyOptional),
    CaseInsensitive(CaseInsensitive),
    Alternation(Alternation),
    NumberedChoice(NumberedChoice),
    SectionCheckpoint(SectionCheckpoint),
}

impl Expression {
    /// The explicit ordinal carried by this node: `-1` (unset) unless the
    /// node `can_be_reordered()` and an ordinal was parsed for it (§3
    /// invariant 1).
    pub fn explicit_ordinal(&self) -> i32 {
        match self {
            Expression::Simple(n) => n.explicit_ordinal,
            Expression::Argument(n) => n.explicit_ordinal,
            Expression::RawToken(n) => n.explicit_ordinal,
            Expression::Sequence(n) => n.explicit_ordinal,
            Expression::Group(n) | Expression::Counter(n) => n.explicit_ordinal,
            Expression::Optional(n) => n.explicit_ordinal,
            Expression::CompletelyOptional(n) => n.explicit_ordinal,
            Expression::CaseInsensitive(n) => n.explicit_ordinal,
            Expression::Alternation(n) => n.explicit_ordinal,
            Expression::NumberedChoice(n) => n.explicit_ordinal,
            Expression::SectionCheckpoint(n) => n.explicit_ordinal,
        }
    }

    /// Sets the explicit ordinal. Callers must first check
    /// [`Expression::can_be_reordered`] (the parser enforces §3 invariant 1).
    pub fn set_explicit_ordinal(&mut self, ordinal: i32) {
        match self {
            Expression::Simple(n) => n.explicit_ordinal = ordinal,
            Expression::Argument(n) => n.explicit_ordinal = ordinal,
            Expression::RawToken(n) => n.explicit_ordinal = ordinal,
            Expression::Sequence(n) => n.explicit_ordinal = ordinal,
            Expression::Group(n) | Expression::Counter(n) => n.explicit_ordinal = ordinal,
            Expression::Optional(n) => n.explicit_ordinal = ordinal,
            Expression::CompletelyOptional(n) => n.explicit_ordinal = ordinal,
            Expression::CaseInsensitive(n) => n.explicit_ordinal = ordinal,
            Expression::Alternation(n) => n.explicit_ordinal = ordinal,
            Expression::NumberedChoice(n) => n.explicit_ordinal = ordinal,
            Expression::SectionCheckpoint(n) => n.explicit_ordinal = ordinal,
        }
    }

    /// `true` exactly for Argument variants and Groups (§3 invariant 1).
    pub fn can_be_reordered(&self) -> bool {
        matches!(self, Expression::Argument(_) | Expression::Group(_))
    }

    /// Total number of `_`/`…` holes at and below this node, nested included
    /// (§3 data model, §8 property 1).
    pub fn underscore_count(&self) -> usize {
        match self {
            Expression::Simple(_) | Expression::SectionCheckpoint(_) => 0,
            Expression::Argument(_) | Expression::RawToken(_) => 1,
            Expression::Sequence(s) => s.expressions.iter().map(Expression::underscore_count).sum(),
            Expression::Group(g) => g.underscore_count(),
            Expression::Counter(_) => 0,
            Expression::Optional(_) => 0,
            Expression::CompletelyOptional(_) => 0,
            Expression::CaseInsensitive(c) => c.expression.underscore_count(),
            Expression::Alternation(_) => 0,
            Expression::NumberedChoice(_) => 0,
        }
    }

    /// `true` for nodes that push a value onto the parse stack (used by
    /// §3's `CompletelyOptional`/`Counter` underscore-free checks and by the
    /// emitter to decide whether a Sequence child consumes a tuple-type
    /// element). See the `yields_value`/`is_argument_or_group` supplement in
    /// `SPEC_FULL.md` §3.
    pub fn yields_value(&self) -> bool {
        !matches!(self, Expression::Simple(_) | Expression::SectionCheckpoint(_) | Expression::CompletelyOptional(_))
    }

    /// `true` for nodes the enclosing Sequence treats as consuming one
    /// element of the argument tuple type (arguments, raw tokens, and every
    /// kind of group).
    pub fn is_argument_or_group(&self) -> bool {
        matches!(
            self,
            Expression::Argument(_)
                | Expression::RawToken(_)
                | Expression::Group(_)
                | Expression::Counter(_)
                | Expression::Optional(_)
                | Expression::NumberedChoice(_)
        )
    }

    /// The code-point [`Position`] this node's first token started at, used
    /// for error highlighting (`nameHighlightingPc`, §6).
    pub fn position(&self) -> Position {
        match self {
            Expression::Simple(n) => n.position,
            Expression::Argument(n) => n.position,
            Expression::RawToken(n) => n.position,
            Expression::Sequence(n) => n.expressions.first().map(Expression::position).unwrap_or(n.position),
            Expression::Group(n) | Expression::Counter(n) => n.position,
            Expression::Optional(n) => n.position,
            Expression::CompletelyOptional(n) => n.position,
            Expression::CaseInsensitive(n) => n.expression.position(),
            Expression::Alternation(n) => n.position,
            Expression::NumberedChoice(n) => n.alternation.position,
            Expression::SectionCheckpoint(n) => n.position,
        }
    }

    /// Re-checks §3's structural invariants 4-6 on a freshly parsed node.
    /// The parser is expected to reject violations as it goes (so this
    /// mostly documents and double-checks the invariants rather than
    /// catching anything the parser missed); see `SPEC_FULL.md` §1
    /// "Additional in-scope surface".
    pub fn sanity_check(&self) -> Result<()> {
        match self {
            Expression::Counter(g) | Expression::Group(g) => {
                g.before_dagger.sanity_check()?;
                g.after_dagger.sanity_check()?;
                if matches!(self, Expression::Counter(_)) && g.underscore_count() != 0 {
                    return Err(MalformedMessage::octothorp_must_follow_a_simple_group_or_ellipsis(g.position).into());
                }
            }
            Expression::Optional(o) => {
                if o.sequence.underscore_count() != 0 {
                    return Err(MalformedMessage::question_mark_must_follow_a_simple_group(o.position).into());
                }
                o.sequence.sanity_check()?;
            }
            Expression::CompletelyOptional(c) => {
                if c.expression.underscore_count() != 0 {
                    return Err(
                        MalformedMessage::double_question_mark_must_follow_a_token_or_simple_group(c.position).into()
                    );
                }
                c.expression.sanity_check()?;
            }
            Expression::CaseInsensitive(c) => {
                c.expression.sanity_check()?;
            }
            Expression::Sequence(s) => {
                for child in &s.expressions {
                    child.sanity_check()?;
                }
            }
            Expression::Alternation(a) => {
                for alt in &a.alternatives {
                    alt.sanity_check()?;
                }
            }
            Expression::NumberedChoice(n) => {
                if n.alternation.alternatives.iter().any(|a| a.underscore_count() != 0) {
                    return Err(MalformedMessage::exclamation_mark_must_follow_an_alternation_group(n.alternation.position).into());
                }
            }
            Expression::Simple(_) | Expression::Argument(_) | Expression::RawToken(_) | Expression::SectionCheckpoint(_) => {}
        }
        Ok(())
    }
}

/// The default explicit-ordinal value, re-exported for constructors outside
/// this module (the parser).
pub const UNSET_ORDINAL: i32 = NO_ORDINAL;
