// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! `printSendNodeOn` (`spec.md` §6, `SPEC_FULL.md` §6's fixed output
//! grammar): reconstructs a call site's source text from its parsed grammar
//! tree, splicing in already-rendered argument phrases in parse order.
//!
//! Argument-or-group slots are consumed as opaque, pre-rendered strings: the
//! concrete Avail phrase model that would let this printer recurse into a
//! group's own repeated sub-phrases is "the general Avail object model" the
//! spec names as an external collaborator (§1), out of scope for the
//! splitter itself. A caller with real phrases renders each one (including
//! any nested group repetitions) before calling this function.

use avail_splitter_ast::{Expression, MessagePart, Sequence};

pub fn print_sequence(root: &Sequence, parts: &[MessagePart], arguments: &[String]) -> String {
    let mut out = String::new();
    let mut cursor = 0usize;
    render_sequence(root, parts, arguments, &mut cursor, &mut out);
    out
}

fn render_sequence(seq: &Sequence, parts: &[MessagePart], arguments: &[String], cursor: &mut usize, out: &mut String) {
    for expr in &seq.expressions {
        render_expr(expr, parts, arguments, cursor, out);
    }
}

fn render_expr(expr: &Expression, parts: &[MessagePart], arguments: &[String], cursor: &mut usize, out: &mut String) {
    match expr {
        Expression::Simple(s) => {
            if let Some(part) = parts.get(s.token_index) {
                push_token(out, part.text());
            }
        }
        Expression::Argument(_) | Expression::RawToken(_) | Expression::Group(_) | Expression::Counter(_)
        | Expression::Optional(_) | Expression::NumberedChoice(_) => {
            if let Some(arg) = arguments.get(*cursor) {
                push_token(out, arg);
            }
            *cursor += 1;
        }
        Expression::CompletelyOptional(_) | Expression::Alternation(_) | Expression::SectionCheckpoint(_) => {}
        Expression::CaseInsensitive(c) => render_expr(&c.expression, parts, arguments, cursor, out),
        Expression::Sequence(s) => render_sequence(s, parts, arguments, cursor, out),
    }
}

/// Single spaces between tokens, except around the `,`-family punctuation
/// parts (`SPEC_FULL.md` §6's fixed output grammar).
fn push_token(out: &mut String, token: &str) {
    if !out.is_empty() && needs_space_before(token) && !out.ends_with(' ') {
        out.push(' ');
    }
    out.push_str(token);
}

fn needs_space_before(token: &str) -> bool {
    !matches!(token, "," | ";" | ":" | ".")
}

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::{ArgumentExpr, ArgumentKind, Simple};
    use avail_splitter_span::Position;

    #[test]
    fn splices_arguments_between_literal_parts() {
        let parts = vec![MessagePart::new("Foo", Position(1)), MessagePart::new("_", Position(4)), MessagePart::new("bar", Position(5))];
        let mut seq = Sequence::new(Position(1));
        seq.push(Expression::Simple(Simple::new(0, Position(1))));
        seq.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(4))));
        seq.push(Expression::Simple(Simple::new(2, Position(5))));
        let out = print_sequence(&seq, &parts, &["5".to_string()]);
        assert_eq!(out, "Foo 5 bar");
    }
}
