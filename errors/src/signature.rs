// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use crate::fmt_code;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every way `checkType`/`checkImplementationSignature` can reject a
/// signature. Carries no message or position — per `spec.md` §7, a signature
/// error carries the code only, and a failure for one signature is
/// independent of any other call against the same tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureErrorCode {
    IncorrectArgumentType,
    IncorrectNumberOfArguments,
    IncorrectTypeForGroup,
    IncorrectTypeForComplexGroup,
    IncorrectTypeForCountingGroup,
    IncorrectTypeForBooleanGroup,
    IncorrectTypeForNumberedChoice,
}

impl fmt::Display for SignatureErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_code(f, &format!("{self:?}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{0}")]
pub struct SignatureError(pub SignatureErrorCode);

impl SignatureError {
    pub fn incorrect_argument_type() -> Self {
        Self(SignatureErrorCode::IncorrectArgumentType)
    }
    pub fn incorrect_number_of_arguments() -> Self {
        Self(SignatureErrorCode::IncorrectNumberOfArguments)
    }
    pub fn incorrect_type_for_group() -> Self {
        Self(SignatureErrorCode::IncorrectTypeForGroup)
    }
    pub fn incorrect_type_for_complex_group() -> Self {
        Self(SignatureErrorCode::IncorrectTypeForComplexGroup)
    }
    pub fn incorrect_type_for_counting_group() -> Self {
        Self(SignatureErrorCode::IncorrectTypeForCountingGroup)
    }
    pub fn incorrect_type_for_boolean_group() -> Self {
        Self(SignatureErrorCode::IncorrectTypeForBooleanGroup)
    }
    pub fn incorrect_type_for_numbered_choice() -> Self {
        Self(SignatureErrorCode::IncorrectTypeForNumberedChoice)
    }
}
