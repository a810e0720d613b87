// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use super::{Expression, Sequence};
use crate::ordinal::NO_ORDINAL;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};

/// `«...»?` — zero-or-one repetition of a simple group's body, with the
/// presence of the repetition itself delivered as a boolean (§3,
/// `Optional(sequence)`). Its body must contain no holes (§3 invariant 4,
/// `QUESTION_MARK_MUST_FOLLOW_A_SIMPLE_GROUP`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Optional {
    pub sequence: Sequence,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl Optional {
    pub fn new(sequence: Sequence, position: Position) -> Self {
        Self { sequence, position, explicit_ordinal: NO_ORDINAL }
    }
}

/// `«...»??` — zero-or-one repetition of a token or simple group's body that
/// delivers nothing at all, not even a boolean (§3, `CompletelyOptional`).
/// Its body must likewise contain no holes
/// (`DOUBLE_QUESTION_MARK_MUST_FOLLOW_A_TOKEN_OR_SIMPLE_GROUP`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletelyOptional {
    pub expression: Box<Expression>,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl CompletelyOptional {
    pub fn new(expression: Expression, position: Position) -> Self {
        Self { expression: Box::new(expression), position, explicit_ordinal: NO_ORDINAL }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expression::{Simple, Expression};

    #[test]
    fn optional_wraps_a_sequence() {
        let seq = Sequence::new(Position(1));
        let opt = Optional::new(seq, Position(1));
        assert_eq!(opt.sequence.expressions.len(), 0);
        assert_eq!(opt.explicit_ordinal, NO_ORDINAL);
    }

    #[test]
    fn completely_optional_wraps_one_expression() {
        let inner = Expression::Simple(Simple::new(0, Position(2)));
        let c = CompletelyOptional::new(inner, Position(1));
        assert!(matches!(*c.expression, Expression::Simple(_)));
    }
}
