// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Avail message splitter's public facade (`spec.md` §6): the single
//! entry point a compiler, linter, or IDE plugin uses to turn a method name
//! into parsing instructions, check an implementation's signature, and
//! render diagnostics and call sites.
//!
//! Shaped after `leo_compiler::Compiler<'a>`: a struct built once from its
//! input, bundling state that downstream passes read from repeatedly rather
//! than recomputing.
//! `MessageSplitter` is simpler than `Compiler` in one respect the spec is
//! explicit about (§5): once constructed it is logically immutable, so every
//! `instructions_for`/`check_implementation_signature` call is independent —
//! there is no staged `parse` → `canonicalize` → `codegen` pipeline of
//! mutating passes to drive, just one parse up front and then read-only
//! queries against its result.

#![forbid(unsafe_code)]

mod print;

pub use avail_splitter_ast::{Expression, MessagePart, Sequence, SizeRange, Type, TupleShape};
pub use avail_splitter_errors::{MalformedMessage, Result, SignatureError, SplitterError};
pub use avail_splitter_passes::{Instruction, Opcode, SharedTables};
pub use avail_splitter_span::Position;

use avail_splitter_ast::Expression as Expr;
use avail_splitter_passes::{check_implementation_signature as check_impl_signature, instructions_for, SharedTables as Tables};
use std::sync::OnceLock;
use tracing::debug;

/// The code point `name_highlighting_pc` inserts at the offending position
/// (§6), the same caret-insertion-point mark the host Avail implementation
/// uses for this purpose.
pub const ERROR_INDICATOR: char = '\u{2041}';

/// The two process-wide registries (§4.6), shared by every
/// [`MessageSplitter`] in the process so that a permutation or type index
/// handed to a caller remains valid and comparable for the life of the
/// process (§8 property 5).
fn shared_tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::new)
}

/// The splitter for one method name (§6). Lexes and parses `name` once at
/// construction; every other method is a read-only query against the
/// resulting tree.
pub struct MessageSplitter {
    name: String,
    root: Sequence,
    message_parts: Vec<MessagePart>,
}

impl MessageSplitter {
    /// Lexes and parses `name`, failing with a [`MalformedMessage`] (wrapped
    /// in [`SplitterError`]) if its embedded grammar is malformed (§4.1,
    /// §4.2).
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        debug!(name = %name, "splitting message name");
        let message_parts = avail_splitter_parser::lex(&name)?;
        let root = avail_splitter_parser::parse(&name)?;
        Ok(Self { name, root, message_parts })
    }

    /// The name this splitter was constructed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of top-level arguments or groups (§6, §8 property 2).
    pub fn number_of_arguments(&self) -> usize {
        self.root.argument_count()
    }

    /// Total number of `_`/`…` holes anywhere in the tree, nested included
    /// (§6, §8 property 1).
    pub fn number_of_underscores(&self) -> usize {
        self.root.expressions.iter().map(Expr::underscore_count).sum()
    }

    /// Number of `§` section checkpoints (§6).
    pub fn number_of_section_checkpoints(&self) -> usize {
        count_checkpoints(&self.root)
    }

    /// `true` if the tree contains any bracketed repetition construct —
    /// `Group`, `Counter`, `Optional`, `CompletelyOptional`, or
    /// `NumberedChoice` — all of which originate from `«...»` syntax (§6).
    pub fn contains_groups(&self) -> bool {
        contains_groups(&self.root)
    }

    /// The message parts the name lexed into (§6).
    pub fn message_parts(&self) -> &[MessagePart] {
        &self.message_parts
    }

    /// The code-point position of each message part (§6).
    pub fn message_part_positions(&self) -> Vec<Position> {
        self.message_parts.iter().map(MessagePart::position).collect()
    }

    /// The indices, into [`MessageSplitter::message_parts`], of every part
    /// that is itself an argument or raw-token hole (`_`/`…`), in lexical
    /// order (§6).
    pub fn underscore_part_numbers(&self) -> Vec<usize> {
        self.message_parts
            .iter()
            .enumerate()
            .filter(|(_, part)| matches!(part.text(), "_" | "…"))
            .map(|(index, _)| index)
            .collect()
    }

    /// `checkImplementationSignature` (§6, §4.3): checks a function/closure
    /// type's parameter types against either a prefix function's visible
    /// arguments (`section_number <= number_of_section_checkpoints()`) or
    /// the whole method/macro body otherwise.
    pub fn check_implementation_signature(&self, function_type: &Type, section_number: u32) -> Result<()> {
        let checkpoints = self.number_of_section_checkpoints() as u32;
        check_impl_signature(&self.root, function_type, section_number, checkpoints).map_err(Into::into)
    }

    /// `instructionsFor` (§6): checks `phrase_type` against the tree and, if
    /// it matches, emits the linear instruction program a call-site parser
    /// should run.
    pub fn instructions_for(&self, phrase_type: &Type) -> Result<Vec<Instruction>> {
        let (instructions, _) = instructions_for(&self.root, phrase_type, shared_tables())?;
        Ok(instructions)
    }

    /// `originExpressionsFor` (§6): the [`Expression`] that produced each
    /// instruction [`MessageSplitter::instructions_for`] would emit for the
    /// same `phrase_type`, aligned index-for-index.
    pub fn origin_expressions_for(&self, phrase_type: &Type) -> Result<Vec<Expression>> {
        let (_, origins) = instructions_for(&self.root, phrase_type, shared_tables())?;
        Ok(origins)
    }

    /// `nameHighlightingPc` (§6): re-renders [`MessageSplitter::name`] with
    /// [`ERROR_INDICATOR`] inserted at the position of the token that
    /// produced the instruction at `pc`, or the literal
    /// `"(any method invocation)"` when `pc == 0`.
    pub fn name_highlighting_pc(&self, phrase_type: &Type, pc: usize) -> Result<String> {
        if pc == 0 {
            return Ok("(any method invocation)".to_string());
        }
        let (_, origins) = instructions_for(&self.root, phrase_type, shared_tables())?;
        let position = origins.get(pc - 1).map(Expression::position).unwrap_or(Position::NONE);
        Ok(highlight_at(&self.name, position))
    }

    /// `printSendNodeOn` (§6): pretty-prints a call site, consuming
    /// already-rendered argument phrases in parse order. See
    /// [`print::print_sequence`] for the scope of what this does and does
    /// not reconstruct.
    pub fn print_send_node_on(&self, arguments: &[String]) -> String {
        print::print_sequence(&self.root, &self.message_parts, arguments)
    }
}

fn highlight_at(name: &str, position: Position) -> String {
    if position.is_none() {
        return format!("{ERROR_INDICATOR}{name}");
    }
    let target = position.0 as usize;
    let mut out = String::with_capacity(name.len() + ERROR_INDICATOR.len_utf8());
    let mut inserted = false;
    for (i, c) in name.chars().enumerate() {
        if i + 1 == target {
            out.push(ERROR_INDICATOR);
            inserted = true;
        }
        out.push(c);
    }
    if !inserted {
        out.push(ERROR_INDICATOR);
    }
    out
}

fn count_checkpoints(seq: &Sequence) -> usize {
    seq.expressions.iter().map(count_checkpoints_expr).sum()
}

fn count_checkpoints_expr(expr: &Expr) -> usize {
    match expr {
        Expr::SectionCheckpoint(_) => 1,
        Expr::Sequence(s) => count_checkpoints(s),
        Expr::Group(g) | Expr::Counter(g) => count_checkpoints(&g.before_dagger) + count_checkpoints(&g.after_dagger),
        Expr::Optional(o) => count_checkpoints(&o.sequence),
        Expr::CompletelyOptional(c) => count_checkpoints_expr(&c.expression),
        Expr::CaseInsensitive(c) => count_checkpoints_expr(&c.expression),
        Expr::Alternation(a) => a.alternatives.iter().map(count_checkpoints_expr).sum(),
        Expr::NumberedChoice(n) => n.alternation.alternatives.iter().map(count_checkpoints_expr).sum(),
        Expr::Simple(_) | Expr::Argument(_) | Expr::RawToken(_) => 0,
    }
}

fn contains_groups(seq: &Sequence) -> bool {
    seq.expressions.iter().any(contains_groups_expr)
}

fn contains_groups_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Group(_) | Expr::Counter(_) | Expr::Optional(_) | Expr::CompletelyOptional(_) | Expr::NumberedChoice(_) => true,
        Expr::Sequence(s) => contains_groups(s),
        Expr::CaseInsensitive(c) => contains_groups_expr(&c.expression),
        Expr::Alternation(a) => a.alternatives.iter().any(contains_groups_expr),
        Expr::Simple(_) | Expr::Argument(_) | Expr::RawToken(_) | Expr::SectionCheckpoint(_) => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_a_reports_one_argument_and_one_group() {
        let splitter = MessageSplitter::new("Foo_:_«_,»withSomething_:").unwrap();
        assert!(splitter.contains_groups());
        assert_eq!(splitter.number_of_underscores(), 4);
    }

    #[test]
    fn instructions_for_round_trips_a_simple_argument() {
        let splitter = MessageSplitter::new("Foo_:").unwrap();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        let instructions = splitter.instructions_for(&ty).unwrap();
        let origins = splitter.origin_expressions_for(&ty).unwrap();
        assert_eq!(instructions.len(), origins.len());
        assert!(instructions.iter().any(|i| i.opcode == Opcode::ParseArgument));
    }

    #[test]
    fn instructions_for_rejects_wrong_arity() {
        let splitter = MessageSplitter::new("Foo_:").unwrap();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any, Type::Any]));
        assert!(splitter.instructions_for(&ty).is_err());
    }

    #[test]
    fn name_highlighting_pc_zero_is_any_invocation() {
        let splitter = MessageSplitter::new("Foo_:").unwrap();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        assert_eq!(splitter.name_highlighting_pc(&ty, 0).unwrap(), "(any method invocation)");
    }

    #[test]
    fn name_highlighting_pc_inserts_indicator_at_origin_position() {
        let splitter = MessageSplitter::new("Foo_:").unwrap();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        let highlighted = splitter.name_highlighting_pc(&ty, 1).unwrap();
        assert!(highlighted.contains(ERROR_INDICATOR));
    }

    #[test]
    fn print_send_node_on_splices_arguments_into_literal_text() {
        let splitter = MessageSplitter::new("Foo_:bar_:").unwrap();
        let out = splitter.print_send_node_on(&["1".to_string(), "2".to_string()]);
        assert_eq!(out, "Foo 1: bar 2:");
    }

    #[test]
    fn underscore_part_numbers_finds_every_hole() {
        let splitter = MessageSplitter::new("Foo_:bar_:").unwrap();
        assert_eq!(splitter.underscore_part_numbers(), vec![1, 4]);
    }

    #[test]
    fn malformed_name_is_rejected_at_construction() {
        assert!(MessageSplitter::new(" Foo").is_err());
    }
}
