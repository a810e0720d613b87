// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! Signature checking and type-directed instruction emission (`spec.md`
//! §4.3-§4.6): everything that turns a parsed [`avail_splitter_ast::Sequence`]
//! and a phrase type into a checked, linear instruction program.
//!
//! Laid out the way `leo-passes` separates its `code_generation` module from
//! the rest of the compiler pipeline, depending on `avail-splitter-ast`
//! rather than the reverse (see `compiler/ast/src/expression/mod.rs`'s module
//! doc comment).

#![forbid(unsafe_code)]

pub mod emitter;
pub mod generator;
pub mod instruction;
pub mod signature_checker;
pub mod tables;

pub use emitter::{emit_on, emit_root};
pub use generator::{InstructionGenerator, Label};
pub use instruction::{ConversionKind, Instruction, Opcode};
pub use signature_checker::{check_implementation_signature, check_type};
pub use tables::SharedTables;

use avail_splitter_ast::{Expression, Sequence, Type};
use avail_splitter_errors::Result;

/// Runs the signature checker and then the type-directed emitter over
/// `root` for `phrase_type`, exactly as `instructionsFor`/
/// `originExpressionsFor` do together (§6): a signature mismatch is reported
/// before any instruction is emitted, never as a partially-built program.
pub fn instructions_for(
    root: &Sequence,
    phrase_type: &Type,
    tables: &SharedTables,
) -> Result<(Vec<Instruction>, Vec<Expression>)> {
    check_type(&Expression::Sequence(root.clone()), phrase_type)?;
    let mut generator = InstructionGenerator::new();
    emit_root(root, &mut generator, phrase_type, tables);
    Ok(generator.finish())
}

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::{ArgumentExpr, ArgumentKind, TupleShape};
    use avail_splitter_span::Position;

    #[test]
    fn instructions_for_rejects_before_emitting_on_arity_mismatch() {
        let mut root = Sequence::new(Position(1));
        root.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(1))));
        let tables = SharedTables::new();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any, Type::Any]));
        assert!(instructions_for(&root, &ty, &tables).is_err());
    }

    #[test]
    fn instructions_for_emits_aligned_origins() {
        let mut root = Sequence::new(Position(1));
        root.push(Expression::Argument(ArgumentExpr::new(ArgumentKind::Plain, 1, Position(1))));
        let tables = SharedTables::new();
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any]));
        let (tape, origins) = instructions_for(&root, &ty, &tables).unwrap();
        assert_eq!(tape.len(), origins.len());
    }
}
