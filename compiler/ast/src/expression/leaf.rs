// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use crate::ordinal::NO_ORDINAL;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};

/// A literal keyword or operator part to match in the input (`spec.md` §3,
/// `Simple(tokenIndex)`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simple {
    /// Index into the splitter's message-part list.
    pub token_index: usize,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl Simple {
    pub fn new(token_index: usize, position: Position) -> Self {
        Self { token_index, position, explicit_ordinal: NO_ORDINAL }
    }
}

/// Which of the four `_`-family holes an [`ArgumentExpr`] represents
/// (`spec.md` §3/§4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// `_` — an ordinary argument.
    Plain,
    /// `_†` — parsed in outer (module) scope, evaluated at compile time.
    ModuleScope,
    /// `_↑` — parse a variable reference rather than its value.
    VariableQuote,
    /// `_!` — accept a ⊤- or ⊥-yielding argument (macro-only).
    MacroOnly,
}

/// An argument hole: `_`, `_†`, `_↑`, or `_!` (§3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentExpr {
    pub kind: ArgumentKind,
    /// The absolute index of this underscore among every underscore in the
    /// whole tree, assigned left to right starting at 1 (used by
    /// `CHECK_ARGUMENT`, §4.5).
    pub absolute_underscore_index: usize,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl ArgumentExpr {
    pub fn new(kind: ArgumentKind, absolute_underscore_index: usize, position: Position) -> Self {
        Self { kind, absolute_underscore_index, position, explicit_ordinal: NO_ORDINAL }
    }
}

/// Which of the four `…`-family raw-token holes a [`RawTokenExpr`]
/// represents (§4.2's post-token modifier table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawTokenKind {
    /// `…` alone — capture a single keyword token.
    Keyword,
    /// `…!` — capture any single token.
    Any,
    /// `…#` — capture a whole-number-literal token.
    WholeNumberLiteral,
    /// `…$` — capture a string-literal token.
    StringLiteral,
}

/// A raw-token capture hole: `…`, `…!`, `…#`, or `…$` (§3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokenExpr {
    pub kind: RawTokenKind,
    pub absolute_underscore_index: usize,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl RawTokenExpr {
    pub fn new(kind: RawTokenKind, absolute_underscore_index: usize, position: Position) -> Self {
        Self { kind, absolute_underscore_index, position, explicit_ordinal: NO_ORDINAL }
    }
}

/// A `§` marker, assigned a dense, 1-based `subscript` in source order
/// during parsing (§3, §3 invariant 7).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCheckpoint {
    pub subscript: u32,
    pub position: Position,
    pub explicit_ordinal: i32,
}

impl SectionCheckpoint {
    pub fn new(subscript: u32, position: Position) -> Self {
        Self { subscript, position, explicit_ordinal: NO_ORDINAL }
    }
}
