// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use crate::fmt_code;
use avail_splitter_span::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every way the Name Lexer or Name Parser can reject a method name.
///
/// One variant per error code enumerated in `spec.md` §6, excluding the
/// signature-checker codes (see [`crate::SignatureErrorCode`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MalformedCode {
    MethodNameIsNotCanonical,
    UnbalancedGuillemets,
    AlternativeMustNotContainArguments,
    OctothorpMustFollowASimpleGroupOrEllipsis,
    DollarSignMustFollowAnEllipsis,
    QuestionMarkMustFollowASimpleGroup,
    TildeMustNotFollowArgument,
    VerticalBarMustSeparateTokensOrSimpleGroups,
    ExclamationMarkMustFollowAnAlternationGroup,
    DoubleQuestionMarkMustFollowATokenOrSimpleGroup,
    CaseInsensitiveExpressionCanonization,
    ExpectedOperatorAfterBackquote,
    UpArrowMustFollowArgument,
    InconsistentArgumentReordering,
    IncorrectUseOfDoubleDagger,
}

impl fmt::Display for MalformedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_code(f, &format!("{self:?}"))
    }
}

/// A name-level failure: a code, a human-readable message, and the one-based
/// code-point [`Position`] in the name string the caller should highlight.
///
/// Corresponds 1:1 to the `MalformedMessage{code, message, position}` thrown
/// by `new MessageSplitter(name)` in `spec.md` §6.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{code}: {message} (at position {position})")]
pub struct MalformedMessage {
    pub code: MalformedCode,
    pub message: String,
    pub position: Position,
}

impl MalformedMessage {
    fn new(code: MalformedCode, message: impl Into<String>, position: Position) -> Self {
        Self { code, message: message.into(), position }
    }

    pub fn method_name_is_not_canonical(position: Position) -> Self {
        Self::new(
            MalformedCode::MethodNameIsNotCanonical,
            "a space may only separate two identifier runs",
            position,
        )
    }

    pub fn unbalanced_guillemets(position: Position) -> Self {
        Self::new(MalformedCode::UnbalancedGuillemets, "unbalanced «» at top level", position)
    }

    pub fn alternative_must_not_contain_arguments(position: Position) -> Self {
        Self::new(
            MalformedCode::AlternativeMustNotContainArguments,
            "an alternative in a `|`-list must not contain an argument, subgroup, or underscore",
            position,
        )
    }

    pub fn octothorp_must_follow_a_simple_group_or_ellipsis(position: Position) -> Self {
        Self::new(
            MalformedCode::OctothorpMustFollowASimpleGroupOrEllipsis,
            "`#` must follow a simple group `»` or a raw-token `…`",
            position,
        )
    }

    pub fn dollar_sign_must_follow_an_ellipsis(position: Position) -> Self {
        Self::new(
            MalformedCode::DollarSignMustFollowAnEllipsis,
            "`$` must follow a raw-token `…`",
            position,
        )
    }

    pub fn question_mark_must_follow_a_simple_group(position: Position) -> Self {
        Self::new(
            MalformedCode::QuestionMarkMustFollowASimpleGroup,
            "`?` must follow a group close `»`",
            position,
        )
    }

    pub fn tilde_must_not_follow_argument(position: Position) -> Self {
        Self::new(
            MalformedCode::TildeMustNotFollowArgument,
            "`~` must follow an expression whose literal parts are all lowercase",
            position,
        )
    }

    pub fn vertical_bar_must_separate_tokens_or_simple_groups(position: Position) -> Self {
        Self::new(
            MalformedCode::VerticalBarMustSeparateTokensOrSimpleGroups,
            "`|` must separate simple tokens or simple groups",
            position,
        )
    }

    pub fn exclamation_mark_must_follow_an_alternation_group(position: Position) -> Self {
        Self::new(
            MalformedCode::ExclamationMarkMustFollowAnAlternationGroup,
            "`!` after `»` must follow a group containing exactly one alternation and no arguments",
            position,
        )
    }

    pub fn double_question_mark_must_follow_a_token_or_simple_group(position: Position) -> Self {
        Self::new(
            MalformedCode::DoubleQuestionMarkMustFollowATokenOrSimpleGroup,
            "`⁇` must follow a token or a simple, argument-free group",
            position,
        )
    }

    pub fn case_insensitive_expression_canonization(position: Position) -> Self {
        Self::new(
            MalformedCode::CaseInsensitiveExpressionCanonization,
            "`~` may only follow an expression whose literal parts are already all lowercase",
            position,
        )
    }

    pub fn expected_operator_after_backquote(position: Position) -> Self {
        Self::new(
            MalformedCode::ExpectedOperatorAfterBackquote,
            "a backquote must be followed by an operator character, a space, or an underscore",
            position,
        )
    }

    pub fn up_arrow_must_follow_argument(position: Position) -> Self {
        Self::new(MalformedCode::UpArrowMustFollowArgument, "`↑` must follow `_`", position)
    }

    pub fn inconsistent_argument_reordering(position: Position) -> Self {
        Self::new(
            MalformedCode::InconsistentArgumentReordering,
            "either every reorderable child of a sequence carries an explicit ordinal, or none do",
            position,
        )
    }

    pub fn incorrect_use_of_double_dagger(position: Position) -> Self {
        Self::new(
            MalformedCode::IncorrectUseOfDoubleDagger,
            "a group may contain at most one `‡`",
            position,
        )
    }
}
