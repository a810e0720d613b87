// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use super::Expression;
use crate::ordinal::NO_ORDINAL;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};

/// `a|b|c` — a choice among two or more alternatives, none of which may
/// contain a hole (§3, `Alternation(alternatives[])`, §6
/// `ALTERNATIVE_MUST_NOT_CONTAIN_ARGUMENTS`). An alternation itself yields no
/// value; only its numbered-choice wrapper ([`NumberedChoice`]) does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternation {
    pub alternatives: Vec<Expression>,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl Alternation {
    pub fn new(position: Position) -> Self {
        Self { alternatives: Vec::new(), position, explicit_ordinal: NO_ORDINAL }
    }
}

/// `«a|b|c»!` — an alternation whose matched branch index (one-based) is
/// delivered as a whole number (§3, `NumberedChoice(alternation)`, §6
/// `EXCLAMATION_MARK_MUST_FOLLOW_AN_ALTERNATION_GROUP`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberedChoice {
    pub alternation: Alternation,
    pub explicit_ordinal: i32,
}

impl NumberedChoice {
    pub fn new(alternation: Alternation) -> Self {
        Self { alternation, explicit_ordinal: NO_ORDINAL }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expression::{Simple, Expression};

    #[test]
    fn numbered_choice_exposes_alternation_fields() {
        let mut alt = Alternation::new(Position(1));
        alt.alternatives.push(Expression::Simple(Simple::new(0, Position(2))));
        alt.alternatives.push(Expression::Simple(Simple::new(1, Position(4))));
        let n = NumberedChoice::new(alt);
        assert_eq!(n.alternation.alternatives.len(), 2);
        assert_eq!(n.alternation.position, Position(1));
        assert_eq!(n.explicit_ordinal, NO_ORDINAL);
    }
}
