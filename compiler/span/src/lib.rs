// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! One-based code-point positions within a message name.
//!
//! Avail method names are plain Unicode strings, not source files, so the
//! splitter only ever needs a single flat coordinate: "the Nth code point of
//! the name string". [`Position`] is that coordinate. It plays the same role
//! here that `leo_span::Span`/`BytePos` play for Leo source files, scaled down
//! to the one thing a message name actually needs.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// A one-based code-point position within a message name.
///
/// Position `1` is the first code point of the name. Position `0` is used by
/// callers (see `nameHighlightingPc` in the splitter facade) as a sentinel
/// meaning "no particular position" / "(any method invocation)".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub u32);

impl Position {
    /// The sentinel position meaning "no particular position in the name".
    pub const NONE: Position = Position(0);

    /// Returns `true` if this is the [`Position::NONE`] sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns the next position, one code point further along the name.
    pub fn advance(self, code_points: u32) -> Position {
        Position(self.0 + code_points)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Position(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn none_is_zero_and_reports_none() {
        assert_eq!(Position::NONE, Position(0));
        assert!(Position::NONE.is_none());
        assert!(!Position(1).is_none());
    }

    #[test]
    fn advance_moves_forward_by_code_points() {
        assert_eq!(Position(3).advance(2), Position(5));
    }
}
