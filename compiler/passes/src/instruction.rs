// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The instruction alphabet emitted by [`crate::generator::InstructionGenerator`]
//! (`spec.md` §4.4). Opaque to everything outside the generator beyond its
//! role: each [`Instruction`] is an opcode plus a single operand, the way
//! the contract describes "an integer encoding of opcode + operand".

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry from the instruction alphabet enumerated in §4.4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    ParsePart,
    ParsePartCaseInsensitively,
    ParseArgument,
    ParseArgumentInModuleScope,
    ParseVariableReference,
    ParseTopValuedArgument,
    ParseAnyRawToken,
    ParseRawKeywordToken,
    ParseRawStringLiteralToken,
    ParseRawWholeNumberLiteralToken,
    CheckArgument,
    TypeCheckArgument,
    Convert,
    NewList,
    AppendArgument,
    PermuteList,
    Branch,
    Jump,
    SaveParsePosition,
    EnsureParseProgress,
    DiscardSavedParsePosition,
    CheckAtLeast,
    CheckAtMost,
    PushTrue,
    PushFalse,
    PushIntegerLiteral,
    PrepareToRunPrefixFunction,
    RunPrefixFunction,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The two sub-kinds of `CONVERT` the emitter needs (§4.5: `ArgumentInModuleScope`
/// emits `CONVERT(EVALUATE_EXPRESSION)`; `Counter` emits `CONVERT(LIST_TO_SIZE)`
/// to reduce its accumulated list to its length). Encoded as the `Convert`
/// instruction's operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionKind {
    EvaluateExpression,
    ListToSize,
}

/// One emitted instruction: an opcode and its single operand, if any.
///
/// Operands mean different things per opcode: a token index (`ParsePart`),
/// an absolute underscore index (`CheckArgument`), a type-registry index
/// (`TypeCheckArgument`), a permutation-registry index (`PermuteList`), an
/// instruction index (`Branch`/`Jump`, resolved by backpatching), a literal
/// (`PushIntegerLiteral`, `CheckAtLeast`, `CheckAtMost`), a nesting depth
/// (`PrepareToRunPrefixFunction`), a checkpoint subscript (`RunPrefixFunction`),
/// or a [`ConversionKind`] (`Convert`). Opcodes with no meaningful operand
/// (`NewList`, `AppendArgument`, `SaveParsePosition`, ...) carry `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: i64,
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: i64) -> Self {
        Self { opcode, operand }
    }

    pub fn bare(opcode: Opcode) -> Self {
        Self { opcode, operand: 0 }
    }

    pub fn convert(kind: ConversionKind) -> Self {
        Self { opcode: Opcode::Convert, operand: kind as i64 }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand == 0 {
            write!(f, "{}", self.opcode)
        } else {
            write!(f, "{}({})", self.opcode, self.operand)
        }
    }
}
