// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single lexical unit of a message name, with the one-based code-point
/// [`Position`] at which it starts. See `spec.md` §3 "Message part".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    text: String,
    position: Position,
}

impl MessagePart {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self { text: text.into(), position }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// `true` if this part is a single lowercase-only identifier/operator run
    /// (used by `CaseInsensitive`'s "subject must be lowercase" rule, §3
    /// invariant 6).
    pub fn is_lowercase(&self) -> bool {
        self.text.chars().all(|c| !c.is_uppercase())
    }
}

impl fmt::Display for MessagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Classifies a code point the way the Name Lexer does (§4.1): every code
/// point is either an *identifier* character, or one of the fixed
/// operator-or-hole-or-space marks, or a character the host scanner classes
/// as an operator.
///
/// The "host scanner" operator predicate is named in §6 as a consumed
/// external interface; this function stands in for it, recognizing the fixed
/// ASCII punctuation an Avail source scanner treats as operator characters in
/// addition to the marks the splitter's own grammar reserves.
pub fn is_operator_or_hole_or_space(c: char) -> bool {
    matches!(c, '_' | '…' | ' ' | '/' | '$') || is_reserved_mark(c) || is_host_operator_character(c)
}

/// Stand-in for the host scanner's operator-character predicate (an external
/// interface per §6, owned by the compiler's token scanner, out of scope for
/// the splitter itself): ASCII punctuation/symbol characters, excluding the
/// underscore and backquote which the splitter's own grammar gives distinct
/// meaning to.
pub fn is_host_operator_character(c: char) -> bool {
    c.is_ascii_punctuation() && !matches!(c, '_' | '`')
}

/// The marks the splitter's own grammar gives meaning to: guillemets,
/// dagger, modifiers, circled numbers, section checkpoint, backquote.
pub fn is_reserved_mark(c: char) -> bool {
    matches!(c, '«' | '»' | '‡' | '†' | '↑' | '!' | '#' | '~' | '?' | '⁇' | '|' | '§' | '`') || circled_number(c).is_some()
}

/// Maps a circled-number code point (⓪..㊿) to its ordinal 0..50, per the
/// table in `spec.md` §6. Returns `None` for any other code point.
pub fn circled_number(c: char) -> Option<u8> {
    match c {
        '⓪' => Some(0),
        '①'..='⑳' => Some(1 + (c as u32 - '①' as u32) as u8),
        '㉑'..='㉟' => Some(21 + (c as u32 - '㉑' as u32) as u8),
        '㊱'..='㊿' => Some(36 + (c as u32 - '㊱' as u32) as u8),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn circled_number_covers_0_through_50() {
        assert_eq!(circled_number('⓪'), Some(0));
        assert_eq!(circled_number('①'), Some(1));
        assert_eq!(circled_number('⑳'), Some(20));
        assert_eq!(circled_number('㉑'), Some(21));
        assert_eq!(circled_number('㊿'), Some(50));
        assert_eq!(circled_number('x'), None);
    }

    #[test]
    fn lowercase_check() {
        assert!(MessagePart::new("foo", Position(1)).is_lowercase());
        assert!(!MessagePart::new("Foo", Position(1)).is_lowercase());
        assert!(MessagePart::new("+", Position(1)).is_lowercase());
    }
}
