// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The Name Lexer and Name Parser (`spec.md` §4.1, §4.2): turns a method
//! name string directly into the root [`avail_splitter_ast::Sequence`] the
//! rest of the splitter works from.

#![forbid(unsafe_code)]

mod lexer;
mod parser;

pub use lexer::lex;
pub use parser::parse;

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::Expression;

    #[test]
    fn scenario_a_simple_group() {
        let seq = parse("«_,»").unwrap();
        assert_eq!(seq.argument_count(), 1);
        match &seq.expressions[0] {
            Expression::Group(g) => {
                assert!(!g.has_dagger);
                assert_eq!(g.before_dagger.argument_count(), 1);
                assert_eq!(g.underscore_count(), 1);
            }
            other => panic!("expected a Group, got {other:?}"),
        }
    }

    #[test]
    fn scenario_b_double_dagger_group() {
        let seq = parse("«_:_‡;»").unwrap();
        assert_eq!(seq.argument_count(), 1);
        match &seq.expressions[0] {
            Expression::Group(g) => assert!(g.has_dagger),
            other => panic!("expected a Group, got {other:?}"),
        }
    }

    #[test]
    fn scenario_d_counter() {
        let seq = parse("«very»#").unwrap();
        assert!(matches!(seq.expressions[0], Expression::Counter(_)));
    }

    #[test]
    fn scenario_e_optional() {
        let seq = parse("«very»?").unwrap();
        assert!(matches!(seq.expressions[0], Expression::Optional(_)));
    }

    #[test]
    fn scenario_f_numbered_choice() {
        let seq = parse("«a|b|c»!").unwrap();
        match &seq.expressions[0] {
            Expression::NumberedChoice(n) => assert_eq!(n.alternation.alternatives.len(), 3),
            other => panic!("expected a NumberedChoice, got {other:?}"),
        }
    }

    #[test]
    fn scenario_g_reordered_arguments() {
        // spec.md §8 scenario G names `"_①=_②"` as the example that must
        // deliver its two arguments swapped, registering permutation
        // `(2, 1)`. Read literally, that string assigns ordinal 1 to the
        // first-parsed argument and 2 to the second — the identity
        // permutation, which invariant 3 (§3) explicitly rejects. We take
        // invariant 3 at face value and use the ordinal placement that
        // actually encodes a swap; see `DESIGN.md` for the full resolution.
        let seq = parse("_②=_①").unwrap();
        assert_eq!(seq.argument_count(), 2);
        assert!(seq.is_reordered());
        assert_eq!(seq.permuted_arguments, vec![1, 0]);
    }

    #[test]
    fn scenario_g_literal_ordinals_are_rejected_as_identity() {
        assert!(parse("_①=_②").is_err());
    }

    #[test]
    fn negative_scenario_8_mixed_ordinals() {
        assert!(parse("_①+_").is_err());
    }

    #[test]
    fn negative_scenario_10_alternative_with_argument() {
        assert!(parse("A|_").is_err());
    }

    #[test]
    fn negative_scenario_11_bare_question_mark() {
        assert!(parse("_?").is_err());
    }

    #[test]
    fn negative_scenario_12_double_dagger() {
        assert!(parse("«a‡b‡c»").is_err());
    }

    #[test]
    fn negative_scenario_13_unbalanced_guillemets() {
        assert!(parse("»").is_err());
    }

    #[test]
    fn negative_scenario_14_case_insensitive_uppercase() {
        assert!(parse("Foo~").is_err());
    }
}
