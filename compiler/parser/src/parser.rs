// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Name Parser (`spec.md` §4.2): turns the flat [`MessagePart`] list the
//! lexer produces into a typed [`Expression`] tree.
//!
//! Shaped like `leo_parser::ParserContext`'s single-token lookahead cursor,
//! but over message parts instead of language tokens, and recursive-descent
//! rather than Pratt-parsing, since the name grammar has no operator
//! precedence to resolve.

use crate::lexer::lex;
use avail_splitter_ast::part::circled_number;
use avail_splitter_ast::{
    Alternation, ArgumentExpr, ArgumentKind, CaseInsensitive, CompletelyOptional, Expression, Group, MessagePart,
    NumberedChoice, Optional, RawTokenExpr, RawTokenKind, ReorderMode, SectionCheckpoint, Sequence, Simple,
    permutation_from_ordinals,
};
use avail_splitter_errors::{MalformedMessage, Result};
use avail_splitter_span::Position;

/// Parses a whole method name into its root [`Sequence`].
pub fn parse(name: &str) -> Result<Sequence> {
    let parts = lex(name)?;
    let mut parser = Parser::new(parts);
    let root = parser.parse_sequence()?;
    if parser.idx != parser.parts.len() {
        return Err(MalformedMessage::unbalanced_guillemets(parser.current_position()).into());
    }
    root.sanity_check()?;
    Ok(root)
}

struct Parser {
    parts: Vec<MessagePart>,
    idx: usize,
    next_underscore_index: usize,
    next_checkpoint_subscript: u32,
}

impl Parser {
    fn new(parts: Vec<MessagePart>) -> Self {
        Self { parts, idx: 0, next_underscore_index: 1, next_checkpoint_subscript: 1 }
    }

    fn peek(&self) -> Option<&str> {
        self.parts.get(self.idx).map(MessagePart::text)
    }

    fn current_position(&self) -> Position {
        match self.parts.get(self.idx) {
            Some(p) => p.position(),
            None => self.parts.last().map(|p| p.position().advance(1)).unwrap_or(Position(1)),
        }
    }

    fn bump(&mut self) -> MessagePart {
        let part = self.parts[self.idx].clone();
        self.idx += 1;
        part
    }

    /// Consumes a trailing circled-number mark if present, returning its
    /// numeric value and position.
    fn try_consume_ordinal(&mut self) -> Option<(i32, Position)> {
        let text = self.peek()?;
        let mut chars = text.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let value = circled_number(c)?;
        let pos = self.parts[self.idx].position();
        self.idx += 1;
        Some((value as i32, pos))
    }

    /// The root entry point and the body of every group half: consumes terms
    /// (and `|`-alternations of terms) until end-of-parts, `»`, or `‡`.
    fn parse_sequence(&mut self) -> Result<Sequence> {
        let start_pos = self.current_position();
        let mut seq = Sequence::new(start_pos);
        let mut mode = ReorderMode::Unset;

        loop {
            match self.peek() {
                None | Some("»") | Some("‡") => break,
                _ => {}
            }

            let expr = self.parse_term_or_alternation()?;
            if expr.can_be_reordered() {
                mode = mode
                    .admit(expr.explicit_ordinal())
                    .ok_or_else(|| MalformedMessage::inconsistent_argument_reordering(expr.position()))?;
            }
            seq.push(expr);
        }

        if mode == ReorderMode::AllNumbered {
            let mut ordinals = Vec::with_capacity(seq.arguments_view.len());
            for &i in &seq.arguments_view {
                let child = &seq.expressions[i];
                if !child.can_be_reordered() {
                    return Err(MalformedMessage::inconsistent_argument_reordering(child.position()).into());
                }
                ordinals.push(child.explicit_ordinal());
            }
            match permutation_from_ordinals(&ordinals) {
                Some(perm) => seq.set_permuted_arguments(perm),
                None => return Err(MalformedMessage::inconsistent_argument_reordering(seq.position).into()),
            }
        }

        Ok(seq)
    }

    /// Parses one term, then, if it is followed by `|`, gathers the rest of
    /// the alternative list and wraps the whole thing as a single
    /// [`Expression::Alternation`] (§4.2 "Alternation parsing").
    fn parse_term_or_alternation(&mut self) -> Result<Expression> {
        let first = self.parse_term()?;
        if self.peek() != Some("|") {
            return Ok(first);
        }

        if !is_simple_literal(&first) {
            return Err(MalformedMessage::alternative_must_not_contain_arguments(first.position()).into());
        }
        let position = first.position();
        let mut alternatives = vec![first];
        loop {
            self.bump();
            match self.peek() {
                None | Some("»") | Some("‡") | Some("|") => {
                    return Err(
                        MalformedMessage::vertical_bar_must_separate_tokens_or_simple_groups(self.current_position())
                            .into(),
                    );
                }
                _ => {}
            }
            let next = self.parse_term()?;
            if !is_simple_literal(&next) {
                return Err(MalformedMessage::alternative_must_not_contain_arguments(next.position()).into());
            }
            alternatives.push(next);
            if self.peek() != Some("|") {
                break;
            }
        }

        Ok(Expression::Alternation(Alternation { alternatives, position, explicit_ordinal: avail_splitter_ast::NO_ORDINAL }))
    }

    /// Parses one primitive term plus the postfix marks that can follow any
    /// term regardless of its kind: an explicit ordinal, `⁇`, and `~`.
    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_core_term()?;

        if let Some((value, pos)) = self.try_consume_ordinal() {
            if !expr.can_be_reordered() {
                return Err(MalformedMessage::inconsistent_argument_reordering(pos).into());
            }
            expr.set_explicit_ordinal(value);
        }

        if self.peek() == Some("⁇") {
            let pos = self.current_position();
            let eligible = match &expr {
                Expression::Simple(_) => true,
                Expression::Group(g) => !g.has_dagger && g.underscore_count() == 0,
                _ => false,
            };
            if !eligible {
                return Err(MalformedMessage::double_question_mark_must_follow_a_token_or_simple_group(pos).into());
            }
            self.bump();
            let position = expr.position();
            expr = Expression::CompletelyOptional(CompletelyOptional::new(expr, position));
        }

        if self.peek() == Some("~") {
            let pos = self.current_position();
            self.bump();
            if matches!(expr, Expression::Argument(_) | Expression::RawToken(_)) {
                return Err(MalformedMessage::tilde_must_not_follow_argument(pos).into());
            }
            if !self.literal_parts_are_lowercase(&expr) {
                return Err(MalformedMessage::case_insensitive_expression_canonization(pos).into());
            }
            expr = Expression::CaseInsensitive(CaseInsensitive::new(expr));
        }

        Ok(expr)
    }

    fn parse_core_term(&mut self) -> Result<Expression> {
        let pos = self.current_position();
        match self.peek() {
            Some("_") => self.parse_argument(),
            Some("…") => self.parse_raw_token(),
            Some("«") => self.parse_group(),
            Some("§") => {
                self.bump();
                let subscript = self.next_checkpoint_subscript;
                self.next_checkpoint_subscript += 1;
                Ok(Expression::SectionCheckpoint(SectionCheckpoint::new(subscript, pos)))
            }
            Some("`") => self.parse_escaped_operator(),
            Some("#") => Err(MalformedMessage::octothorp_must_follow_a_simple_group_or_ellipsis(pos).into()),
            Some("$") => Err(MalformedMessage::dollar_sign_must_follow_an_ellipsis(pos).into()),
            Some("?") => Err(MalformedMessage::question_mark_must_follow_a_simple_group(pos).into()),
            Some("~") => Err(MalformedMessage::case_insensitive_expression_canonization(pos).into()),
            Some("|") => Err(MalformedMessage::vertical_bar_must_separate_tokens_or_simple_groups(pos).into()),
            Some("!") => Err(MalformedMessage::exclamation_mark_must_follow_an_alternation_group(pos).into()),
            Some("↑") => Err(MalformedMessage::up_arrow_must_follow_argument(pos).into()),
            Some("⁇") => Err(MalformedMessage::double_question_mark_must_follow_a_token_or_simple_group(pos).into()),
            Some("»") | Some("‡") | None => Err(MalformedMessage::unbalanced_guillemets(pos).into()),
            Some(_) => self.parse_simple(),
        }
    }

    fn parse_simple(&mut self) -> Result<Expression> {
        let token_index = self.idx;
        let part = self.bump();
        Ok(Expression::Simple(Simple::new(token_index, part.position())))
    }

    fn parse_escaped_operator(&mut self) -> Result<Expression> {
        let bq_pos = self.current_position();
        self.bump();
        match self.parts.get(self.idx) {
            Some(next) if next.text().chars().count() == 1 && is_mark_character(next.text().chars().next().unwrap()) => {
                let token_index = self.idx;
                self.bump();
                Ok(Expression::Simple(Simple::new(token_index, bq_pos)))
            }
            _ => Err(MalformedMessage::expected_operator_after_backquote(bq_pos).into()),
        }
    }

    fn parse_argument(&mut self) -> Result<Expression> {
        let pos = self.current_position();
        self.bump();
        let kind = match self.peek() {
            Some("†") => {
                self.bump();
                ArgumentKind::ModuleScope
            }
            Some("↑") => {
                self.bump();
                ArgumentKind::VariableQuote
            }
            Some("!") => {
                self.bump();
                ArgumentKind::MacroOnly
            }
            _ => ArgumentKind::Plain,
        };
        let index = self.next_underscore_index;
        self.next_underscore_index += 1;
        Ok(Expression::Argument(ArgumentExpr::new(kind, index, pos)))
    }

    fn parse_raw_token(&mut self) -> Result<Expression> {
        let pos = self.current_position();
        self.bump();
        let kind = match self.peek() {
            Some("!") => {
                self.bump();
                RawTokenKind::Any
            }
            Some("#") => {
                self.bump();
                RawTokenKind::WholeNumberLiteral
            }
            Some("$") => {
                self.bump();
                RawTokenKind::StringLiteral
            }
            _ => RawTokenKind::Keyword,
        };
        let index = self.next_underscore_index;
        self.next_underscore_index += 1;
        Ok(Expression::RawToken(RawTokenExpr::new(kind, index, pos)))
    }

    fn parse_group(&mut self) -> Result<Expression> {
        let open_pos = self.current_position();
        self.bump();

        let mut group = Group::new(open_pos);
        group.before_dagger = self.parse_sequence()?;

        match self.peek() {
            Some("‡") => {
                let dagger_pos = self.current_position();
                self.bump();
                group.has_dagger = true;
                group.dagger_position = dagger_pos;
                group.after_dagger = self.parse_sequence()?;
                match self.peek() {
                    Some("»") => {
                        self.bump();
                    }
                    Some("‡") => {
                        return Err(MalformedMessage::incorrect_use_of_double_dagger(self.current_position()).into());
                    }
                    _ => return Err(MalformedMessage::unbalanced_guillemets(open_pos).into()),
                }
            }
            Some("»") => {
                self.bump();
            }
            _ => return Err(MalformedMessage::unbalanced_guillemets(open_pos).into()),
        }

        self.finish_group(group, open_pos)
    }

    /// Applies the `#`/`?`/`!` postfix modifiers that can immediately follow
    /// a group's closing `»`, defaulting to a plain [`Expression::Group`].
    fn finish_group(&mut self, mut group: Group, open_pos: Position) -> Result<Expression> {
        match self.peek() {
            Some("#") => {
                let pos = self.current_position();
                if group.underscore_count() != 0 {
                    return Err(MalformedMessage::octothorp_must_follow_a_simple_group_or_ellipsis(pos).into());
                }
                self.bump();
                Ok(Expression::Counter(group))
            }
            Some("?") => {
                let pos = self.current_position();
                self.bump();
                if group.underscore_count() == 0 {
                    let seq = combined_sequence(group, open_pos);
                    Ok(Expression::Optional(Optional::new(seq, open_pos)))
                } else {
                    if group.has_dagger {
                        return Err(MalformedMessage::question_mark_must_follow_a_simple_group(pos).into());
                    }
                    group.maximum_cardinality = Some(1);
                    Ok(Expression::Group(group))
                }
            }
            Some("!") => {
                let pos = self.current_position();
                let only_child_is_alternation = !group.has_dagger
                    && group.underscore_count() == 0
                    && group.after_dagger.expressions.is_empty()
                    && group.before_dagger.expressions.len() == 1
                    && matches!(group.before_dagger.expressions[0], Expression::Alternation(_));
                if !only_child_is_alternation {
                    return Err(MalformedMessage::exclamation_mark_must_follow_an_alternation_group(pos).into());
                }
                self.bump();
                match group.before_dagger.expressions.into_iter().next().unwrap() {
                    Expression::Alternation(a) => Ok(Expression::NumberedChoice(NumberedChoice::new(a))),
                    _ => unreachable!(),
                }
            }
            _ => Ok(Expression::Group(group)),
        }
    }

    /// Walks `expr` checking that every literal [`Simple`] part it contains
    /// is lowercase (§3 invariant 6, the subject requirement for a trailing
    /// `~`).
    fn literal_parts_are_lowercase(&self, expr: &Expression) -> bool {
        match expr {
            Expression::Simple(s) => self.parts[s.token_index].is_lowercase(),
            Expression::Sequence(seq) => seq.expressions.iter().all(|e| self.literal_parts_are_lowercase(e)),
            Expression::CompletelyOptional(c) => self.literal_parts_are_lowercase(&c.expression),
            Expression::CaseInsensitive(c) => self.literal_parts_are_lowercase(&c.expression),
            Expression::Alternation(a) => a.alternatives.iter().all(|e| self.literal_parts_are_lowercase(e)),
            Expression::Argument(_) | Expression::RawToken(_) | Expression::SectionCheckpoint(_) => true,
            Expression::Group(g) | Expression::Counter(g) => {
                g.before_dagger.expressions.iter().all(|e| self.literal_parts_are_lowercase(e))
                    && g.after_dagger.expressions.iter().all(|e| self.literal_parts_are_lowercase(e))
            }
            Expression::Optional(o) => o.sequence.expressions.iter().all(|e| self.literal_parts_are_lowercase(e)),
            Expression::NumberedChoice(n) => {
                n.alternation.alternatives.iter().all(|e| self.literal_parts_are_lowercase(e))
            }
        }
    }
}

fn combined_sequence(group: Group, position: Position) -> Sequence {
    let mut seq = Sequence::new(position);
    for expr in group.before_dagger.expressions {
        seq.push(expr);
    }
    for expr in group.after_dagger.expressions {
        seq.push(expr);
    }
    seq
}

/// Whether `c` is one of the single-character marks a backquote may legally
/// escape (the "operator" half of §4.2's backquote rule): either a reserved
/// grammar mark or a host-operator character.
fn is_mark_character(c: char) -> bool {
    avail_splitter_ast::part::is_operator_or_hole_or_space(c)
}

/// An alternative is restricted to literal keyword/operator content: no
/// argument hole and no subgroup of any kind (§4.2 "an alternative ...
/// containing any Argument, subgroup, or underscore").
fn is_simple_literal(expr: &Expression) -> bool {
    match expr {
        Expression::Simple(_) | Expression::SectionCheckpoint(_) => true,
        Expression::Sequence(s) => s.expressions.iter().all(is_simple_literal),
        _ => false,
    }
}

