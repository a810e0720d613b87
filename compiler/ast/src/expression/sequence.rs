// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use super::Expression;
use crate::ordinal::NO_ORDINAL;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};

/// An ordered juxtaposition of expressions (`spec.md` §3,
/// `Sequence(expressions[], argumentsView, permutedArguments,
/// argumentsAreReordered?)`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub expressions: Vec<Expression>,
    /// Indices into `expressions` of the children that consume one element
    /// of the enclosing tuple type (`Expression::is_argument_or_group`),
    /// cached in parse order.
    pub arguments_view: Vec<usize>,
    /// The zero-based permutation to apply to delivered arguments, or empty
    /// if this sequence is not reordered (§3 invariant 3).
    pub permuted_arguments: Vec<usize>,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl Sequence {
    pub fn new(position: Position) -> Self {
        Self {
            expressions: Vec::new(),
            arguments_view: Vec::new(),
            permuted_arguments: Vec::new(),
            position,
            explicit_ordinal: NO_ORDINAL,
        }
    }

    /// Appends a child, updating `arguments_view` as needed. Reorder
    /// consistency (§4.2) is enforced by the parser, which calls
    /// [`Sequence::set_permuted_arguments`] once the whole sequence is
    /// closed.
    pub fn push(&mut self, expression: Expression) {
        if expression.is_argument_or_group() {
            self.arguments_view.push(self.expressions.len());
        }
        self.expressions.push(expression);
    }

    pub fn set_permuted_arguments(&mut self, permutation: Vec<usize>) {
        self.permuted_arguments = permutation;
    }

    /// Number of top-level arguments or groups in this sequence (§8
    /// property 2: "nested holes inside a Group count as one").
    pub fn argument_count(&self) -> usize {
        self.arguments_view.len()
    }

    pub fn is_reordered(&self) -> bool {
        !self.permuted_arguments.is_empty()
    }

    /// Iterates the argument-bearing children in parse order together with
    /// the zero-based *delivered* tuple-type slot each should be checked or
    /// emitted against: `permuted_arguments[i]` if reordered, else `i`
    /// itself (§4.2/§4.3: "applying the permutation if reordered").
    pub fn arguments_in_parse_order(&self) -> impl Iterator<Item = (&Expression, usize)> + '_ {
        self.arguments_view.iter().enumerate().map(move |(i, &child_index)| {
            let slot = if self.is_reordered() { self.permuted_arguments[i] } else { i };
            (&self.expressions[child_index], slot)
        })
    }
}
