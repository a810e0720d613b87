// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! `checkType` and `checkImplementationSignature` (`spec.md` §4.3): verifies
//! a tuple type (or phrase type interpreted as such) is structurally
//! compatible with a parsed grammar tree, failing with a specific
//! [`SignatureError`] code rather than recovering or falling back to a
//! default.

use avail_splitter_ast::{Expression, Group, Sequence, SizeRange, Type};
use avail_splitter_errors::{Result, SignatureError};

/// Verifies that `ty` is compatible with `expr`'s grammar (§4.3's
/// `checkType`, entered at the root of a tree — `instructionsFor`'s
/// argument-count mismatch is reported as `INCORRECT_NUMBER_OF_ARGUMENTS`).
pub fn check_type(expr: &Expression, ty: &Type) -> Result<()> {
    check_type_inner(expr, ty, true)
}

fn check_type_inner(expr: &Expression, ty: &Type, is_root: bool) -> Result<()> {
    if ty.is_bottom() {
        return Err(SignatureError::incorrect_argument_type().into());
    }
    match expr {
        Expression::Argument(_) | Expression::RawToken(_) => Ok(()),
        Expression::Sequence(seq) => check_sequence(seq, ty, is_root),
        Expression::Group(g) => check_group(g, ty),
        Expression::Counter(g) => {
            let _ = g;
            if !ty.is_whole_number() {
                return Err(SignatureError::incorrect_type_for_counting_group().into());
            }
            Ok(())
        }
        Expression::Optional(_) => {
            if !ty.is_boolean() {
                return Err(SignatureError::incorrect_type_for_boolean_group().into());
            }
            Ok(())
        }
        Expression::NumberedChoice(n) => {
            let k = n.alternation.alternatives.len() as i64;
            if !ty.is_subrange_of(1, k) {
                return Err(SignatureError::incorrect_type_for_numbered_choice().into());
            }
            Ok(())
        }
        // A CaseInsensitive wrapper yields whatever its child yields, so it
        // recurses with the same type. The other four never check types
        // directly (§4.3: "must never be asked to") — they either yield no
        // value (Simple, SectionCheckpoint, CompletelyOptional) or are only
        // ever reached through their NumberedChoice wrapper (Alternation).
        Expression::CaseInsensitive(c) => check_type_inner(&c.expression, ty, false),
        Expression::Alternation(_)
        | Expression::Simple(_)
        | Expression::SectionCheckpoint(_)
        | Expression::CompletelyOptional(_) => Ok(()),
    }
}

fn check_sequence(seq: &Sequence, ty: &Type, is_root: bool) -> Result<()> {
    let shape = ty.subexpressions_tuple_type();
    let n = seq.argument_count();
    if shape.size.exact() != Some(n) {
        return Err(if is_root {
            SignatureError::incorrect_number_of_arguments().into()
        } else {
            SignatureError::incorrect_type_for_group().into()
        });
    }
    for (child, slot) in seq.arguments_in_parse_order() {
        check_type_inner(child, shape.element_type(slot + 1), false)?;
    }
    Ok(())
}

fn check_group(g: &Group, ty: &Type) -> Result<()> {
    let shape = ty.subexpressions_tuple_type();
    let cardinality_bound = SizeRange { min: 0, max: g.maximum_cardinality.map(|m| m as usize) };
    if !shape.size.is_subtype_of(&cardinality_bound) {
        return Err(SignatureError::incorrect_type_for_group().into());
    }

    let variation = shape.variation_len().max(1);

    if g.is_simple() {
        let child = &g.before_dagger.expressions[g.before_dagger.arguments_view[0]];
        for index in 1..=variation {
            check_type_inner(child, shape.element_type(index), false)?;
        }
        return Ok(());
    }

    let before_n = g.before_dagger.argument_count();
    let after_n = g.after_dagger.argument_count();
    for index in 1..=variation {
        let element = shape.element_type(index);
        let inner = element.as_tuple_shape().ok_or_else(|| SignatureError::incorrect_type_for_complex_group())?;
        let len = inner.size.exact().ok_or_else(|| SignatureError::incorrect_type_for_complex_group())?;
        if len < before_n || len > before_n + after_n {
            return Err(SignatureError::incorrect_type_for_complex_group().into());
        }
        for (child, slot) in g.before_dagger.arguments_in_parse_order() {
            check_type_inner(child, inner.element_type(slot + 1), false)?;
        }
        if len > before_n {
            for (child, slot) in g.after_dagger.arguments_in_parse_order() {
                check_type_inner(child, inner.element_type(before_n + slot + 1), false)?;
            }
        }
    }
    Ok(())
}

/// `checkImplementationSignature` (§6, fixed by `SPEC_FULL.md` §4.3): checks
/// a function/closure type's parameter types, represented as a [`Type`]
/// whose subexpressions tuple type's elements are the parameter types.
///
/// `section_number` selects which slice of `root` to check against:
/// - `section_number <= checkpoint_count`: a prefix function attached to the
///   section checkpoint with that subscript. Its checked parameter count
///   must equal the number of arguments visible before that checkpoint, and
///   each parameter type is checked against the corresponding visible
///   argument in order.
/// - `section_number > checkpoint_count` (the sentinel): the method/macro
///   body, checked exactly as [`check_type`] checks `instructionsFor`.
pub fn check_implementation_signature(
    root: &Sequence,
    function_type: &Type,
    section_number: u32,
    checkpoint_count: u32,
) -> Result<()> {
    if section_number > checkpoint_count {
        return check_type(&Expression::Sequence(root.clone()), function_type);
    }

    let visible = visible_argument_count_before_checkpoint(root, section_number);
    let shape = function_type.subexpressions_tuple_type();
    if shape.size.exact() != Some(visible) {
        return Err(SignatureError::incorrect_number_of_arguments().into());
    }
    for (i, (child, _slot)) in root.arguments_in_parse_order().take(visible).enumerate() {
        check_type_inner(child, shape.element_type(i + 1), false)?;
    }
    Ok(())
}

fn visible_argument_count_before_checkpoint(root: &Sequence, subscript: u32) -> usize {
    let mut count = 0usize;
    for expr in &root.expressions {
        if let Expression::SectionCheckpoint(checkpoint) = expr {
            if checkpoint.subscript == subscript {
                break;
            }
        }
        if expr.is_argument_or_group() {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::{ArgumentExpr, ArgumentKind, SectionCheckpoint, TupleShape};
    use avail_splitter_span::Position;

    fn arg(index: usize) -> Expression {
        Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, index, Position(index as u32)))
    }

    #[test]
    fn bottom_type_is_always_rejected() {
        assert!(check_type(&arg(1), &Type::Bottom).is_err());
    }

    #[test]
    fn sequence_requires_exact_argument_count() {
        let mut seq = Sequence::new(Position(1));
        seq.push(arg(1));
        let good = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        assert!(check_type(&Expression::Sequence(seq.clone()), &good).is_ok());
        let bad = Type::Tuple(TupleShape::fixed(vec![Type::Any, Type::Any]));
        assert!(check_type(&Expression::Sequence(seq), &bad).is_err());
    }

    #[test]
    fn numbered_choice_requires_subrange_of_alternative_count() {
        use avail_splitter_ast::{Alternation, NumberedChoice, Simple};
        let mut alt = Alternation::new(Position(1));
        alt.alternatives.push(Expression::Simple(Simple::new(0, Position(1))));
        alt.alternatives.push(Expression::Simple(Simple::new(1, Position(2))));
        let n = Expression::NumberedChoice(NumberedChoice::new(alt));
        assert!(check_type(&n, &Type::IntegerRange(1, 2)).is_ok());
        assert!(check_type(&n, &Type::IntegerRange(1, 3)).is_err());
    }

    #[test]
    fn counter_requires_whole_number_type() {
        let g = Expression::Counter(Group::new(Position(1)));
        assert!(check_type(&g, &Type::WholeNumber).is_ok());
        assert!(check_type(&g, &Type::Boolean).is_err());
    }

    #[test]
    fn visible_argument_count_stops_at_checkpoint() {
        let mut root = Sequence::new(Position(1));
        root.push(arg(1));
        root.push(arg(2));
        root.push(Expression::SectionCheckpoint(SectionCheckpoint::new(1, Position(3))));
        root.push(arg(3));
        assert_eq!(visible_argument_count_before_checkpoint(&root, 1), 2);
    }

    #[test]
    fn prefix_function_signature_checks_visible_arguments_only() {
        let mut root = Sequence::new(Position(1));
        root.push(arg(1));
        root.push(Expression::SectionCheckpoint(SectionCheckpoint::new(1, Position(2))));
        root.push(arg(2));
        let function_type = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        assert!(check_implementation_signature(&root, &function_type, 1, 1).is_ok());
        let wrong_arity = Type::Tuple(TupleShape::fixed(vec![Type::Any, Type::Any]));
        assert!(check_implementation_signature(&root, &wrong_arity, 1, 1).is_err());
    }
}
