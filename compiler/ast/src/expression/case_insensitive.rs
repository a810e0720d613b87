// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use super::Expression;
use crate::ordinal::NO_ORDINAL;
use serde::{Deserialize, Serialize};

/// `~` suffix on a keyword — matches the wrapped expression ignoring case
/// (§3, `CaseInsensitive(expression)`). Has no position of its own; it
/// defers to its wrapped expression's position for highlighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseInsensitive {
    pub expression: Box<Expression>,
    pub explicit_ordinal: i32,
}

impl CaseInsensitive {
    pub fn new(expression: Expression) -> Self {
        Self { expression: Box::new(expression), explicit_ordinal: NO_ORDINAL }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expression::Simple;
    use avail_splitter_span::Position;

    #[test]
    fn wraps_one_expression_with_no_ordinal_by_default() {
        let c = CaseInsensitive::new(Expression::Simple(Simple::new(0, Position(1))));
        assert_eq!(c.explicit_ordinal, NO_ORDINAL);
        assert!(matches!(*c.expression, Expression::Simple(_)));
    }
}
