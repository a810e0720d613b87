// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Name Lexer (`spec.md` §4.1): splits a method name string into an
//! ordered list of [`MessagePart`]s.
//!
//! Modelled on `leo_parser::tokenizer`'s character-at-a-time scan, scaled
//! down to the splitter's much smaller alphabet: there is no keyword table or
//! numeric-literal grammar here, only identifier runs versus single-character
//! operator/hole/space marks.

use avail_splitter_ast::{part::is_operator_or_hole_or_space, MessagePart};
use avail_splitter_errors::{MalformedMessage, Result};
use avail_splitter_span::Position;

fn is_identifier_char(c: char) -> bool {
    !is_operator_or_hole_or_space(c)
}

/// Splits `name` into message parts per §4.1's rules.
pub fn lex(name: &str) -> Result<Vec<MessagePart>> {
    let chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    let mut parts = Vec::new();
    let mut i = 0usize;
    let mut last_was_identifier = false;

    while i < n {
        let c = chars[i];
        let pos = Position((i + 1) as u32);

        if c == ' ' {
            if !last_was_identifier {
                return Err(MalformedMessage::method_name_is_not_canonical(pos).into());
            }
            let next = chars.get(i + 1).copied();
            let next_is_escaped_underscore = next == Some('`') && chars.get(i + 2).copied() == Some('_');
            let next_starts_identifier = next.map(is_identifier_char).unwrap_or(false);
            if !next_starts_identifier && !next_is_escaped_underscore {
                return Err(MalformedMessage::method_name_is_not_canonical(pos).into());
            }
            i += 1;
            continue;
        }

        let starts_escaped_underscore = c == '`' && chars.get(i + 1).copied() == Some('_');
        if is_identifier_char(c) || starts_escaped_underscore {
            let start = pos;
            let mut text = String::new();
            while i < n {
                let cc = chars[i];
                if cc == '`' && chars.get(i + 1).copied() == Some('_') {
                    text.push('_');
                    i += 2;
                    continue;
                }
                if is_identifier_char(cc) {
                    text.push(cc);
                    i += 1;
                } else {
                    break;
                }
            }
            parts.push(MessagePart::new(text, start));
            last_was_identifier = true;
            continue;
        }

        // Every other operator-or-hole-or-space code point, including a
        // backquote not followed by `_`, becomes its own one-character part.
        parts.push(MessagePart::new(c.to_string(), pos));
        last_was_identifier = false;
        i += 1;
    }

    Ok(parts)
}

#[cfg(test)]
mod test {
    use super::*;

    fn texts(name: &str) -> Vec<String> {
        lex(name).unwrap().into_iter().map(|p| p.text().to_string()).collect()
    }

    #[test]
    fn splits_keywords_and_holes() {
        assert_eq!(texts("Foo_bar_"), vec!["Foo", "_", "bar", "_"]);
    }

    #[test]
    fn space_between_identifiers_emits_no_part() {
        assert_eq!(texts("a b"), vec!["a", "b"]);
    }

    #[test]
    fn space_before_escaped_underscore_is_allowed() {
        assert_eq!(texts("a `_b"), vec!["a", "_b"]);
    }

    #[test]
    fn backquote_underscore_is_escaped_inside_identifier() {
        assert_eq!(texts("a`_b"), vec!["a_b"]);
    }

    #[test]
    fn leading_space_is_an_error() {
        assert!(lex(" a").is_err());
    }

    #[test]
    fn space_before_operator_is_an_error() {
        assert!(lex("a !b").is_err());
    }

    #[test]
    fn guillemets_and_marks_are_one_char_parts() {
        assert_eq!(texts("«_,»"), vec!["«", "_", ",", "»"]);
    }

    #[test]
    fn lone_backquote_is_its_own_part() {
        assert_eq!(texts("a`+"), vec!["a", "`", "+"]);
    }

    #[test]
    fn positions_are_one_based_code_points() {
        let parts = lex("«_»").unwrap();
        assert_eq!(parts[0].position(), Position(1));
        assert_eq!(parts[1].position(), Position(2));
        assert_eq!(parts[2].position(), Position(3));
    }
}
