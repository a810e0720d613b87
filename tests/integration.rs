// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! Black-box coverage of the scenario table from `spec.md` §8, driven
//! entirely through the public [`MessageSplitter`] facade — no internal
//! crate is touched directly, the same way `leo`'s own black-box compiler
//! tests drive the crate's single public entry point end to end rather than
//! reaching into its passes.

use avail_splitter::{MessageSplitter, Opcode, Type, TupleShape, SizeRange};

fn any_tuple(n: usize) -> Type {
    Type::Tuple(TupleShape::fixed(vec![Type::Any; n]))
}

#[test]
fn scenario_a_simple_group_reports_one_argument() {
    let splitter = MessageSplitter::new("Foo_:«_,»withBar_:").unwrap();
    assert_eq!(splitter.number_of_arguments(), 3);
    assert!(splitter.contains_groups());
}

#[test]
fn scenario_a_tuple_of_anys_is_a_compatible_signature() {
    // `"«_,»"`, against "tuple of (tuple of anys)" (§8 scenario A): the
    // group's literal comma alongside its single hole must not route it to
    // the double-wrapped general emission path.
    let splitter = MessageSplitter::new("«_,»").unwrap();
    let group_type = Type::ListPhrase(TupleShape::homogeneous(SizeRange::at_least(0), Type::Any));
    let ty = Type::Tuple(TupleShape::fixed(vec![group_type]));
    let instructions = splitter.instructions_for(&ty).unwrap();
    assert!(instructions.iter().any(|i| i.opcode == Opcode::ParseArgument));
    // A literal part inside the group (the comma) parses via PARSE_PART, not
    // a second APPEND_ARGUMENT — only the hole is appended to the list.
    assert!(instructions.iter().any(|i| i.opcode == Opcode::ParsePart));
    assert_eq!(instructions.iter().filter(|i| i.opcode == Opcode::AppendArgument).count(), 1);
}

#[test]
fn scenario_b_double_dagger_group_parses_and_emits() {
    let splitter = MessageSplitter::new("add«_+_‡,»toList_:").unwrap();
    assert!(splitter.contains_groups());
    let element = TupleShape::fixed(vec![Type::Any, Type::Any]);
    let group_type = Type::ListPhrase(TupleShape::with_variation(SizeRange::at_least(0), Vec::new(), Type::Tuple(element)));
    let ty = Type::Tuple(TupleShape::fixed(vec![group_type, Type::Any]));
    let instructions = splitter.instructions_for(&ty).unwrap();
    assert!(instructions.iter().any(|i| i.opcode == Opcode::NewList));
}

#[test]
fn scenario_d_counter_reduces_repetitions_to_a_size() {
    let splitter = MessageSplitter::new("very«very»#good_:").unwrap();
    assert_eq!(splitter.number_of_arguments(), 2);
    let ty = Type::Tuple(TupleShape::fixed(vec![Type::WholeNumber, Type::Any]));
    let instructions = splitter.instructions_for(&ty).unwrap();
    assert!(instructions.iter().any(|i| i.opcode == Opcode::Convert));
}

#[test]
fn scenario_e_optional_pushes_a_boolean() {
    let splitter = MessageSplitter::new("a«very»?nice_:").unwrap();
    assert_eq!(splitter.number_of_arguments(), 2);
    let ty = Type::Tuple(TupleShape::fixed(vec![Type::Boolean, Type::Any]));
    let instructions = splitter.instructions_for(&ty).unwrap();
    assert!(instructions.iter().any(|i| i.opcode == Opcode::PushTrue));
    assert!(instructions.iter().any(|i| i.opcode == Opcode::PushFalse));
}

#[test]
fn scenario_f_numbered_choice_requires_a_subrange_type() {
    let splitter = MessageSplitter::new("pick«red|green|blue»!_:").unwrap();
    let good = Type::Tuple(TupleShape::fixed(vec![Type::IntegerRange(1, 3), Type::Any]));
    assert!(splitter.instructions_for(&good).is_ok());
    let bad = Type::Tuple(TupleShape::fixed(vec![Type::IntegerRange(1, 4), Type::Any]));
    assert!(splitter.instructions_for(&bad).is_err());
}

#[test]
fn scenario_g_reordered_arguments_emit_permute_list() {
    let splitter = MessageSplitter::new("_②=_①").unwrap();
    assert_eq!(splitter.number_of_arguments(), 2);
    let ty = any_tuple(2);
    let instructions = splitter.instructions_for(&ty).unwrap();
    assert!(instructions.iter().any(|i| i.opcode == Opcode::PermuteList));
}

#[test]
fn section_checkpoint_constrains_prefix_function_arity() {
    let splitter = MessageSplitter::new("first_§then_:").unwrap();
    assert_eq!(splitter.number_of_section_checkpoints(), 1);
    let prefix_type = any_tuple(1);
    assert!(splitter.check_implementation_signature(&prefix_type, 1).is_ok());
    let wrong_arity = any_tuple(2);
    assert!(splitter.check_implementation_signature(&wrong_arity, 1).is_err());
    let body_type = any_tuple(2);
    assert!(splitter.check_implementation_signature(&body_type, 2).is_ok());
}

#[test]
fn name_highlighting_pc_reports_any_invocation_for_pc_zero() {
    let splitter = MessageSplitter::new("Foo_:").unwrap();
    let ty = any_tuple(1);
    assert_eq!(splitter.name_highlighting_pc(&ty, 0).unwrap(), "(any method invocation)");
}

#[test]
fn print_send_node_on_reconstructs_the_call_site() {
    let splitter = MessageSplitter::new("move_by_:andThen_:").unwrap();
    let rendered = splitter.print_send_node_on(&["5".to_string(), "north".to_string()]);
    assert!(rendered.contains("5"));
    assert!(rendered.contains("north"));
}

#[test]
fn negative_scenario_8_mixed_ordinals_is_rejected() {
    assert!(MessageSplitter::new("_①+_").is_err());
}

#[test]
fn negative_scenario_10_alternative_with_argument_is_rejected() {
    assert!(MessageSplitter::new("a|_").is_err());
}

#[test]
fn negative_scenario_11_bare_question_mark_is_rejected() {
    assert!(MessageSplitter::new("_?").is_err());
}

#[test]
fn negative_scenario_12_double_dagger_is_rejected() {
    assert!(MessageSplitter::new("«a‡b‡c»").is_err());
}

#[test]
fn negative_scenario_13_unbalanced_guillemets_is_rejected() {
    assert!(MessageSplitter::new("»").is_err());
}

#[test]
fn negative_scenario_14_case_insensitive_uppercase_is_rejected() {
    assert!(MessageSplitter::new("Foo~").is_err());
}

#[test]
fn instructions_for_a_wrong_argument_count_is_a_signature_error_not_a_panic() {
    let splitter = MessageSplitter::new("Foo_:").unwrap();
    assert!(splitter.instructions_for(&any_tuple(2)).is_err());
}
