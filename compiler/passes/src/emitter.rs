// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Type-Directed Emitter (`spec.md` §4.5): walks an [`Expression`] tree
//! alongside the phrase type it must satisfy, unrolling each group's
//! repetitions according to the type's "variation" (its leading, individually
//! typed prefix, §9 Glossary) and appending the resulting instructions and
//! their origin expressions to an [`InstructionGenerator`].
//!
//! Grounded the same way `leo-passes`' own `code_generation` module is: one
//! function per AST shape, threading a single generator through a tree walk
//! (`CodeGenerator::visit_*` dispatch). Unlike that pass, this one is
//! type-directed rather than purely structural — every recursive call carries
//! the [`Type`] the corresponding subtree must parse as, destructured one
//! layer at a time via [`Type::subexpressions_tuple_type`].

use avail_splitter_ast::{
    CaseInsensitive, CompletelyOptional, Expression, Group, NumberedChoice, Optional, Sequence, Type, TupleShape,
};

use crate::generator::{InstructionGenerator, Label};
use crate::instruction::{ConversionKind, Opcode};
use crate::tables::SharedTables;

/// Emits the root sequence's instructions directly onto the parse stack
/// (§4.5 "Sequence (root entry point)"): unlike a nested sequence, the root
/// never wraps its arguments in `NEW_LIST`/`APPEND_ARGUMENT` — they are
/// already the call's own N arguments — but it still permutes them in place
/// if the root is reordered.
pub fn emit_root(root: &Sequence, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    let origin = Expression::Sequence(root.clone());
    let shape = phrase_type.subexpressions_tuple_type();
    emit_sequence_children(root, gen, tables, &shape, 0, &origin, false);
    emit_sequence_permutation(root, gen, tables, &origin);
}

/// Dispatches a single node to its emission recipe, recursing per the shape
/// of `phrase_type` where the node consumes one (§4.5's per-variant
/// sections). Nodes that yield no value (`Simple`, `SectionCheckpoint`,
/// `CompletelyOptional`, `Alternation`) ignore `phrase_type` entirely; it is
/// only ever dereferenced by branches that need it.
pub fn emit_on(expr: &Expression, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    match expr {
        Expression::Simple(s) => {
            gen.emit_parse_part(expr, s.token_index);
        }
        Expression::Argument(a) => {
            let opcode = match a.kind {
                avail_splitter_ast::ArgumentKind::Plain => Opcode::ParseArgument,
                avail_splitter_ast::ArgumentKind::ModuleScope => Opcode::ParseArgumentInModuleScope,
                avail_splitter_ast::ArgumentKind::VariableQuote => Opcode::ParseVariableReference,
                avail_splitter_ast::ArgumentKind::MacroOnly => Opcode::ParseTopValuedArgument,
            };
            gen.emit_bare(expr, opcode);
            gen.emit_op(expr, Opcode::CheckArgument, a.absolute_underscore_index as i64);
            let type_index = tables.types.index_for(phrase_type);
            gen.emit_op(expr, Opcode::TypeCheckArgument, type_index as i64);
            if matches!(a.kind, avail_splitter_ast::ArgumentKind::ModuleScope) {
                gen.emit_convert(expr, ConversionKind::EvaluateExpression);
            }
        }
        Expression::RawToken(r) => {
            let opcode = match r.kind {
                avail_splitter_ast::RawTokenKind::Keyword => Opcode::ParseRawKeywordToken,
                avail_splitter_ast::RawTokenKind::Any => Opcode::ParseAnyRawToken,
                avail_splitter_ast::RawTokenKind::WholeNumberLiteral => Opcode::ParseRawWholeNumberLiteralToken,
                avail_splitter_ast::RawTokenKind::StringLiteral => Opcode::ParseRawStringLiteralToken,
            };
            gen.emit_bare(expr, opcode);
            let type_index = tables.types.index_for(phrase_type);
            gen.emit_op(expr, Opcode::TypeCheckArgument, type_index as i64);
        }
        Expression::Sequence(seq) => emit_nested_sequence(expr, seq, gen, phrase_type, tables),
        Expression::Group(g) => {
            if g.is_simple() {
                emit_simple_group(expr, g, gen, phrase_type, tables);
            } else {
                emit_general_group(expr, g, gen, phrase_type, tables);
            }
        }
        Expression::Counter(g) => emit_counter(expr, g, gen, tables),
        Expression::Optional(o) => emit_optional(expr, o, gen, tables),
        Expression::CompletelyOptional(c) => emit_completely_optional(expr, c, gen, tables),
        Expression::CaseInsensitive(c) => emit_case_insensitive(c, gen, phrase_type, tables),
        Expression::Alternation(_) => {
            // Only ever reached, per the signature checker, through a
            // `NumberedChoice` wrapper or as a free-standing non-value node;
            // either way it does not itself consume `phrase_type`.
            if let Expression::Alternation(a) = expr {
                emit_alternation(expr, a, gen, tables);
            }
        }
        Expression::NumberedChoice(n) => emit_numbered_choice(expr, n, gen, tables),
        Expression::SectionCheckpoint(s) => {
            gen.emit_op(expr, Opcode::PrepareToRunPrefixFunction, gen.partial_lists_count() as i64);
            gen.emit_op(expr, Opcode::RunPrefixFunction, s.subscript as i64);
        }
    }
}

/// Emits a `PERMUTE_LIST` for `seq` if it is reordered, registering its
/// permutation in the shared table (§4.6 item 1).
fn emit_sequence_permutation(seq: &Sequence, gen: &mut InstructionGenerator, tables: &SharedTables, origin: &Expression) {
    if seq.is_reordered() {
        let index = tables.permutations.index_for(&seq.permuted_arguments);
        gen.emit_op(origin, Opcode::PermuteList, index as i64);
    }
}

/// Walks `seq`'s children in order, recursing into each argument-or-group
/// child with the tuple-type element its delivered (possibly permuted) slot
/// names, and into every other child with no meaningful type. When `wrap` is
/// set, each argument-or-group child's value is appended to the list under
/// construction (the non-root "Sequence as list" shape, and each Group
/// iteration's dagger halves); the root sequence passes `wrap = false` since
/// its children already sit on the parse stack as the call's own arguments.
fn emit_sequence_children(
    seq: &Sequence,
    gen: &mut InstructionGenerator,
    tables: &SharedTables,
    shape: &TupleShape,
    slot_offset: usize,
    origin: &Expression,
    wrap: bool,
) {
    let slots: Vec<usize> = seq.arguments_in_parse_order().map(|(_, slot)| slot).collect();
    let mut next_slot = slots.into_iter();
    for child in &seq.expressions {
        if child.is_argument_or_group() {
            let slot = next_slot.next().expect("arguments_view and arguments_in_parse_order agree");
            let element_type = shape.element_type(slot_offset + slot + 1);
            emit_on(child, gen, element_type, tables);
            if wrap {
                gen.emit_bare(origin, Opcode::AppendArgument);
            }
        } else {
            emit_on(child, gen, &Type::Bottom, tables);
        }
    }
}

/// Sequence (non-root entry point, §4.5): wraps its children's values in a
/// fresh list. In the real tree this is unreachable — the parser only ever
/// produces a bare `Sequence` as a `Group`/`Optional` dagger half, never as a
/// free-standing `Expression::Sequence` node — but the signature checker
/// mirrors this same arm for completeness (`check_sequence`), so the emitter
/// does too.
fn emit_nested_sequence(origin: &Expression, seq: &Sequence, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    gen.enter_partial_list();
    gen.emit_bare(origin, Opcode::NewList);
    let shape = phrase_type.subexpressions_tuple_type();
    emit_sequence_children(seq, gen, tables, &shape, 0, origin, true);
    emit_sequence_permutation(seq, gen, tables, origin);
    gen.exit_partial_list();
}

/// A group whose argument shape is a single before-dagger hole and no
/// after-dagger hole, with no dagger (§9 "Simple vs. general groups"):
/// `CHECK_ARGUMENT`'s caller unrolls the variation directly against the
/// single argument child, with no inner sub-list per iteration. The
/// before-dagger half may still carry literal parts alongside that one hole
/// (`«_,»`, §8 scenario A) — every child is re-parsed each iteration, but
/// only the argument-or-group child is appended to the accumulated list.
fn emit_simple_group(origin: &Expression, g: &Group, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    let shape = phrase_type.subexpressions_tuple_type();
    let min_size = shape.size.min;
    let max_size = shape.size.max;

    gen.emit_bare(origin, Opcode::NewList);
    if max_size == Some(0) {
        return;
    }
    let end_of_variation = shape.variation_len() + 1;

    let skip = gen.new_label();
    if min_size == 0 {
        gen.emit_branch(origin, skip);
    }
    gen.emit_bare(origin, Opcode::SaveParsePosition);

    let exit = gen.new_label();
    for index in 1..end_of_variation {
        emit_simple_group_body(origin, g, gen, tables, shape.element_type(index));
        if index >= min_size {
            gen.emit_branch(origin, exit);
        }
        gen.emit_bare(origin, Opcode::EnsureParseProgress);
    }

    let loop_start = gen.new_label();
    let exit_check_min = gen.new_label();
    let default_loop_runs = max_size.map_or(true, |m| end_of_variation < m);
    gen.bind_label(loop_start);
    emit_simple_group_body(origin, g, gen, tables, &shape.default_element);
    if default_loop_runs {
        if end_of_variation >= min_size {
            gen.emit_branch(origin, exit);
        } else {
            gen.emit_branch(origin, exit_check_min);
        }
    }
    if let Some(m) = max_size {
        gen.emit_op(origin, Opcode::CheckAtMost, m as i64 - 1);
    }
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_jump(origin, loop_start);
    if end_of_variation < min_size {
        gen.bind_label(exit_check_min);
        gen.emit_op(origin, Opcode::CheckAtLeast, min_size as i64);
    }

    gen.bind_label(exit);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
    gen.bind_label(skip);
}

/// One iteration's worth of a simple group's before-dagger half: emits every
/// child in parse order (so literal parts like `«_,»`'s comma are re-parsed
/// each time through), appending only the single argument-or-group child to
/// the accumulating list.
fn emit_simple_group_body(origin: &Expression, g: &Group, gen: &mut InstructionGenerator, tables: &SharedTables, element_type: &Type) {
    for child in &g.before_dagger.expressions {
        if child.is_argument_or_group() {
            emit_on(child, gen, element_type, tables);
            gen.emit_bare(origin, Opcode::AppendArgument);
        } else {
            emit_on(child, gen, &Type::Bottom, tables);
        }
    }
}

/// Any group that is not [`Group::is_simple`]: each repetition opens its own
/// sub-list, emits its before-dagger half, optionally exits early on the
/// variation boundary (appending the partial sub-list first — §9 resolves
/// the spec's open question about this case by implementing it literally, see
/// `DESIGN.md`), then emits its after-dagger half under a permutation offset
/// by the before-dagger's argument count, and finally appends the completed
/// sub-list to the outer accumulator.
fn emit_general_group(origin: &Expression, g: &Group, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    let shape = phrase_type.subexpressions_tuple_type();
    let min_size = shape.size.min;
    let max_size = shape.size.max;

    gen.emit_bare(origin, Opcode::NewList);
    if max_size == Some(0) {
        return;
    }
    let end_of_variation = shape.variation_len() + 1;

    let skip = gen.new_label();
    if min_size == 0 {
        gen.emit_branch(origin, skip);
    }
    gen.emit_bare(origin, Opcode::SaveParsePosition);

    let exit = gen.new_label();
    for index in 1..end_of_variation {
        let inner = shape.element_type(index).subexpressions_tuple_type();
        let mid_exit = if index >= min_size { Some(exit) } else { None };
        emit_general_iteration(origin, g, gen, tables, &inner, mid_exit, None);
        gen.emit_bare(origin, Opcode::EnsureParseProgress);
    }

    let loop_start = gen.new_label();
    let exit_check_min = gen.new_label();
    let default_loop_runs = max_size.map_or(true, |m| end_of_variation < m);
    gen.bind_label(loop_start);
    let default_inner = shape.default_element.subexpressions_tuple_type();
    let mid_exit = if default_loop_runs {
        Some(if end_of_variation >= min_size { exit } else { exit_check_min })
    } else {
        None
    };
    let check_at_most = max_size.map(|m| m as i64 - 1);
    emit_general_iteration(origin, g, gen, tables, &default_inner, mid_exit, check_at_most);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_jump(origin, loop_start);
    if end_of_variation < min_size {
        gen.bind_label(exit_check_min);
        gen.emit_op(origin, Opcode::CheckAtLeast, min_size as i64);
    }

    gen.bind_label(exit);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
    gen.bind_label(skip);
}

/// One repetition of a general (double-wrapping) group: opens a sub-list,
/// emits the before-dagger half into it, optionally branches out early
/// (appending the partial sub-list to the outer list first), then — on the
/// non-early-exit path only — emits the after-dagger half under a permutation
/// offset by the before-dagger's own argument count, and appends the
/// completed sub-list. The early-exit append and the full-completion append
/// sit on mutually exclusive control-flow paths, so the sub-list is appended
/// exactly once at runtime regardless of which path is taken.
fn emit_general_iteration(
    origin: &Expression,
    g: &Group,
    gen: &mut InstructionGenerator,
    tables: &SharedTables,
    inner: &TupleShape,
    mid_exit: Option<Label>,
    check_at_most: Option<i64>,
) {
    gen.enter_partial_list();
    gen.emit_bare(origin, Opcode::NewList);
    emit_sequence_children(&g.before_dagger, gen, tables, inner, 0, origin, true);
    emit_sequence_permutation(&g.before_dagger, gen, tables, origin);

    if let Some(exit_label) = mid_exit {
        gen.emit_bare(origin, Opcode::AppendArgument);
        gen.emit_branch(origin, exit_label);
    }
    if let Some(bound) = check_at_most {
        gen.emit_op(origin, Opcode::CheckAtMost, bound);
    }

    let before_n = g.before_dagger.argument_count();
    emit_sequence_children(&g.after_dagger, gen, tables, inner, before_n, origin, true);
    if g.after_dagger.is_reordered() {
        let mut combined: Vec<usize> = (0..before_n + g.after_dagger.argument_count()).collect();
        for (i, &p) in g.after_dagger.permuted_arguments.iter().enumerate() {
            combined[before_n + i] = before_n + p;
        }
        let index = tables.permutations.index_for(&combined);
        gen.emit_op(origin, Opcode::PermuteList, index as i64);
    }
    gen.emit_bare(origin, Opcode::AppendArgument);
    gen.exit_partial_list();
}

/// `«...»#` (§3, §4.5): a zero-or-more loop around an argument-free body,
/// reduced to its repetition count by `CONVERT(LIST_TO_SIZE)`. Unlike a
/// `Group`, a counter's contents carry no type information to destructure —
/// the spec's prose for this case is terser than a `Group`'s, so the loop
/// shape below is a direct, best-effort transcription of the zero-or-more
/// cardinality pattern rather than a literal unambiguous translation (see
/// `DESIGN.md`).
fn emit_counter(origin: &Expression, g: &Group, gen: &mut InstructionGenerator, tables: &SharedTables) {
    gen.emit_bare(origin, Opcode::NewList);
    let empty_shape = TupleShape::fixed(Vec::new());

    let loop_start = gen.new_label();
    let exit = gen.new_label();
    gen.bind_label(loop_start);
    gen.emit_branch(origin, exit);
    gen.emit_bare(origin, Opcode::NewList);
    emit_sequence_children(&g.before_dagger, gen, tables, &empty_shape, 0, origin, false);
    gen.emit_bare(origin, Opcode::AppendArgument);
    if g.has_dagger {
        gen.emit_branch(origin, exit);
    }
    emit_sequence_children(&g.after_dagger, gen, tables, &empty_shape, 0, origin, false);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_jump(origin, loop_start);
    gen.bind_label(exit);
    gen.emit_convert(origin, ConversionKind::ListToSize);
}

/// `«...»?` (§3, §4.5): the repetition's presence itself becomes a boolean.
fn emit_optional(origin: &Expression, o: &Optional, gen: &mut InstructionGenerator, tables: &SharedTables) {
    let absent = gen.new_label();
    let after = gen.new_label();
    gen.emit_branch(origin, absent);
    gen.emit_bare(origin, Opcode::SaveParsePosition);
    let empty_shape = TupleShape::fixed(Vec::new());
    emit_sequence_children(&o.sequence, gen, tables, &empty_shape, 0, origin, false);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
    gen.emit_bare(origin, Opcode::PushTrue);
    gen.emit_jump(origin, after);
    gen.bind_label(absent);
    gen.emit_bare(origin, Opcode::PushFalse);
    gen.bind_label(after);
}

/// `«...»??` (§3, §4.5): like `Optional`, but delivers nothing at all.
fn emit_completely_optional(origin: &Expression, c: &CompletelyOptional, gen: &mut InstructionGenerator, tables: &SharedTables) {
    let skip = gen.new_label();
    gen.emit_branch(origin, skip);
    gen.emit_bare(origin, Opcode::SaveParsePosition);
    emit_on(&c.expression, gen, &Type::Bottom, tables);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
    gen.bind_label(skip);
}

/// `a|b|c` as a free-standing, non-value node (§4.5): a branch chain trying
/// each alternative in turn, none of which is permitted to consume an
/// argument (enforced earlier by `sanity_check`).
fn emit_alternation(origin: &Expression, a: &avail_splitter_ast::Alternation, gen: &mut InstructionGenerator, tables: &SharedTables) {
    gen.emit_bare(origin, Opcode::SaveParsePosition);
    let after = gen.new_label();
    let last = a.alternatives.len().saturating_sub(1);
    for (i, alt) in a.alternatives.iter().enumerate() {
        if i < last {
            let next = gen.new_label();
            gen.emit_branch(origin, next);
            emit_on(alt, gen, &Type::Bottom, tables);
            gen.emit_jump(origin, after);
            gen.bind_label(next);
        } else {
            emit_on(alt, gen, &Type::Bottom, tables);
        }
    }
    gen.bind_label(after);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
}

/// `«a|b|c»!` (§4.5): a branch chain like [`emit_alternation`], but each
/// branch additionally pushes its one-based choice index once matched.
fn emit_numbered_choice(origin: &Expression, n: &NumberedChoice, gen: &mut InstructionGenerator, tables: &SharedTables) {
    gen.emit_bare(origin, Opcode::SaveParsePosition);
    let exit = gen.new_label();
    let last = n.alternation.alternatives.len().saturating_sub(1);
    for (i, alt) in n.alternation.alternatives.iter().enumerate() {
        let choice = (i + 1) as i64;
        if i < last {
            let next = gen.new_label();
            gen.emit_branch(origin, next);
            emit_on(alt, gen, &Type::Bottom, tables);
            gen.emit_op(origin, Opcode::PushIntegerLiteral, choice);
            gen.emit_jump(origin, exit);
            gen.bind_label(next);
        } else {
            emit_on(alt, gen, &Type::Bottom, tables);
            gen.emit_op(origin, Opcode::PushIntegerLiteral, choice);
        }
    }
    gen.bind_label(exit);
    gen.emit_bare(origin, Opcode::EnsureParseProgress);
    gen.emit_bare(origin, Opcode::DiscardSavedParsePosition);
}

/// `~` (§4.4, §4.5): toggles the generator's case-insensitive flag around its
/// child, then restores it — the flag is saved/restored rather than pushed on
/// a stack since `~` never nests (the parser rejects a `CaseInsensitive` whose
/// child is itself a `CaseInsensitive`).
fn emit_case_insensitive(c: &CaseInsensitive, gen: &mut InstructionGenerator, phrase_type: &Type, tables: &SharedTables) {
    let saved = gen.set_case_insensitive(true);
    emit_on(&c.expression, gen, phrase_type, tables);
    gen.set_case_insensitive(saved);
}

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::{ArgumentExpr, ArgumentKind, SizeRange};
    use avail_splitter_span::Position;

    fn arg(index: usize) -> Expression {
        Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, index, Position(index as u32)))
    }

    #[test]
    fn single_argument_emits_check_and_type_check() {
        let mut root = Sequence::new(Position(1));
        root.push(arg(1));
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        emit_root(&root, &mut gen, &Type::Tuple(TupleShape::fixed(vec![Type::Any])), &tables);
        let (tape, origins) = gen.finish();
        assert_eq!(tape.len(), origins.len());
        assert_eq!(tape[0].opcode, Opcode::ParseArgument);
        assert_eq!(tape[1].opcode, Opcode::CheckArgument);
        assert_eq!(tape[2].opcode, Opcode::TypeCheckArgument);
    }

    #[test]
    fn reordered_root_emits_permute_list() {
        let mut root = Sequence::new(Position(1));
        root.push(arg(1));
        root.push(arg(2));
        root.set_permuted_arguments(vec![1, 0]);
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any, Type::Any]));
        emit_root(&root, &mut gen, &ty, &tables);
        let (tape, _) = gen.finish();
        assert_eq!(tape.last().unwrap().opcode, Opcode::PermuteList);
    }

    #[test]
    fn simple_group_unrolls_into_new_list_and_loop() {
        let mut root = Sequence::new(Position(1));
        let mut group = Group::new(Position(1));
        group.before_dagger.push(arg(1));
        root.push(Expression::Group(group));
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        let element_shape = TupleShape::homogeneous(SizeRange::at_least(0), Type::Any);
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::ListPhrase(element_shape)]));
        emit_root(&root, &mut gen, &ty, &tables);
        let (tape, _) = gen.finish();
        assert_eq!(tape[0].opcode, Opcode::NewList);
        assert!(tape.iter().any(|i| i.opcode == Opcode::CheckAtLeast || i.opcode == Opcode::EnsureParseProgress));
    }

    #[test]
    fn counter_ends_with_list_to_size_conversion() {
        let group = Group::new(Position(1));
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        emit_on(&Expression::Counter(group), &mut gen, &Type::WholeNumber, &tables);
        let (tape, _) = gen.finish();
        assert_eq!(tape.last().unwrap().opcode, Opcode::Convert);
    }

    #[test]
    fn optional_pushes_boolean_on_both_paths() {
        let seq = Sequence::new(Position(1));
        let opt = avail_splitter_ast::Optional::new(seq, Position(1));
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        emit_on(&Expression::Optional(opt), &mut gen, &Type::Boolean, &tables);
        let (tape, _) = gen.finish();
        assert!(tape.iter().any(|i| i.opcode == Opcode::PushTrue));
        assert!(tape.iter().any(|i| i.opcode == Opcode::PushFalse));
    }

    #[test]
    fn numbered_choice_pushes_one_based_literal_per_branch() {
        use avail_splitter_ast::{Alternation, NumberedChoice, Simple};
        let mut alt = Alternation::new(Position(1));
        alt.alternatives.push(Expression::Simple(Simple::new(0, Position(1))));
        alt.alternatives.push(Expression::Simple(Simple::new(1, Position(2))));
        let n = NumberedChoice::new(alt);
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        emit_on(&Expression::NumberedChoice(n), &mut gen, &Type::IntegerRange(1, 2), &tables);
        let (tape, _) = gen.finish();
        let literals: Vec<i64> =
            tape.iter().filter(|i| i.opcode == Opcode::PushIntegerLiteral).map(|i| i.operand).collect();
        assert_eq!(literals, vec![1, 2]);
    }

    #[test]
    fn case_insensitive_restores_flag_after_child() {
        let c = CaseInsensitive::new(Expression::Simple(avail_splitter_ast::Simple::new(0, Position(1))));
        let tables = SharedTables::new();
        let mut gen = InstructionGenerator::new();
        emit_case_insensitive(&c, &mut gen, &Type::Bottom, &tables);
        assert!(!gen.case_insensitive());
        let (tape, _) = gen.finish();
        assert_eq!(tape[0].opcode, Opcode::ParsePartCaseInsensitively);
    }
}
