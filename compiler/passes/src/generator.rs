// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The stateful instruction emitter (`spec.md` §4.4, §9 "Label
//! backpatching"): the growing instruction list, an aligned list of origin
//! expressions, a `caseInsensitive` flag, a `partialListsCount` nesting
//! counter, and a label table.
//!
//! Shaped after `leo-passes`' `CodeGenerator<'a>`, which likewise bundles
//! "what am I building" state (there: a register counter and
//! variable/composite name mappings; here: an instruction tape and a label
//! table) behind a single `new()`-constructed struct threaded through one
//! pass over the tree. Unlike `CodeGenerator`, this one carries no handler
//! reference: a single `emitOn` call cannot itself fail (failures are caught
//! earlier, by the signature checker), so there is nothing for it to report.

use avail_splitter_ast::Expression;

use crate::instruction::{ConversionKind, Instruction, Opcode};

/// A forward-referenceable position in the instruction tape, created by
/// [`InstructionGenerator::new_label`] and fixed in place by
/// [`InstructionGenerator::bind_label`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(u32);

enum LabelState {
    Bound(usize),
    Pending(Vec<usize>),
}

/// Per-call emission state (§9: "purely local to one `emitOn` call and needs
/// no synchronization"). Dropped once [`InstructionGenerator::finish`] is
/// called.
pub struct InstructionGenerator {
    instructions: Vec<Instruction>,
    origins: Vec<Expression>,
    case_insensitive: bool,
    partial_lists_count: u32,
    labels: Vec<LabelState>,
}

impl InstructionGenerator {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            origins: Vec::new(),
            case_insensitive: false,
            partial_lists_count: 0,
            labels: Vec::new(),
        }
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn partial_lists_count(&self) -> u32 {
        self.partial_lists_count
    }

    /// A `CaseInsensitive` wrapper saves and restores the flag around its
    /// child (§4.4). Returns the previous value to restore later.
    pub fn set_case_insensitive(&mut self, value: bool) -> bool {
        std::mem::replace(&mut self.case_insensitive, value)
    }

    /// Incremented on entering a Sequence's emission or each half of a
    /// double-wrapped Group, decremented on exit (§4.5 "Nesting counter").
    pub fn enter_partial_list(&mut self) {
        self.partial_lists_count += 1;
    }

    pub fn exit_partial_list(&mut self) {
        self.partial_lists_count -= 1;
    }

    /// Creates a new, initially-unbound label.
    pub fn new_label(&mut self) -> Label {
        let id = self.labels.len() as u32;
        self.labels.push(LabelState::Pending(Vec::new()));
        Label(id)
    }

    /// Appends an encoded instruction, remembering which expression produced
    /// it, and returns its index in the tape.
    pub fn emit(&mut self, origin: &Expression, instruction: Instruction) -> usize {
        let index = self.instructions.len();
        self.instructions.push(instruction);
        self.origins.push(origin.clone());
        index
    }

    pub fn emit_op(&mut self, origin: &Expression, opcode: Opcode, operand: i64) -> usize {
        self.emit(origin, Instruction::new(opcode, operand))
    }

    pub fn emit_bare(&mut self, origin: &Expression, opcode: Opcode) -> usize {
        self.emit(origin, Instruction::bare(opcode))
    }

    pub fn emit_convert(&mut self, origin: &Expression, kind: ConversionKind) -> usize {
        self.emit(origin, Instruction::convert(kind))
    }

    /// Either `PARSE_PART` or `PARSE_PART_CASE_INSENSITIVELY`, selected by
    /// the current flag (§4.4).
    pub fn emit_parse_part(&mut self, origin: &Expression, token_index: usize) -> usize {
        let op = if self.case_insensitive { Opcode::ParsePartCaseInsensitively } else { Opcode::ParsePart };
        self.emit_op(origin, op, token_index as i64)
    }

    /// Emits a `BRANCH`/`JUMP`-family instruction targeting `label`. If the
    /// label is already bound, the operand is its position; otherwise this
    /// instruction's index is recorded as pending and patched once the
    /// label binds (§9 "Label backpatching").
    pub fn emit_to_label(&mut self, origin: &Expression, opcode: Opcode, label: Label) -> usize {
        let index = self.instructions.len();
        match &mut self.labels[label.0 as usize] {
            LabelState::Bound(position) => {
                self.instructions.push(Instruction::new(opcode, *position as i64));
            }
            LabelState::Pending(pending) => {
                pending.push(index);
                self.instructions.push(Instruction::new(opcode, -1));
            }
        }
        self.origins.push(origin.clone());
        index
    }

    pub fn emit_branch(&mut self, origin: &Expression, label: Label) -> usize {
        self.emit_to_label(origin, Opcode::Branch, label)
    }

    pub fn emit_jump(&mut self, origin: &Expression, label: Label) -> usize {
        self.emit_to_label(origin, Opcode::Jump, label)
    }

    /// Binds `label` to the current tape position, resolving every pending
    /// reference to it.
    pub fn bind_label(&mut self, label: Label) {
        let position = self.instructions.len();
        let previous = std::mem::replace(&mut self.labels[label.0 as usize], LabelState::Bound(position));
        if let LabelState::Pending(pending) = previous {
            for index in pending {
                self.instructions[index].operand = position as i64;
            }
        }
    }

    pub fn position(&self) -> usize {
        self.instructions.len()
    }

    /// Consumes the generator, returning the finished tape and its aligned
    /// origin list (`instructionsFor`/`originExpressionsFor`, §6).
    pub fn finish(self) -> (Vec<Instruction>, Vec<Expression>) {
        (self.instructions, self.origins)
    }
}

impl Default for InstructionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use avail_splitter_ast::{Expression, Simple};
    use avail_splitter_span::Position;

    fn dummy() -> Expression {
        Expression::Simple(Simple::new(0, Position(1)))
    }

    #[test]
    fn forward_branch_is_backpatched_on_bind() {
        let mut gen = InstructionGenerator::new();
        let origin = dummy();
        let exit = gen.new_label();
        let branch_idx = gen.emit_branch(&origin, exit);
        gen.emit_bare(&origin, Opcode::NewList);
        gen.bind_label(exit);
        let (tape, _) = gen.finish();
        assert_eq!(tape[branch_idx].operand, 2);
    }

    #[test]
    fn backward_jump_resolves_immediately() {
        let mut gen = InstructionGenerator::new();
        let origin = dummy();
        let loop_start = gen.new_label();
        gen.bind_label(loop_start);
        gen.emit_bare(&origin, Opcode::NewList);
        let jump_idx = gen.emit_jump(&origin, loop_start);
        let (tape, _) = gen.finish();
        assert_eq!(tape[jump_idx].operand, 0);
    }

    #[test]
    fn case_insensitive_flag_toggles_parse_part_opcode() {
        let mut gen = InstructionGenerator::new();
        let origin = dummy();
        let saved = gen.set_case_insensitive(true);
        let idx = gen.emit_parse_part(&origin, 3);
        gen.set_case_insensitive(saved);
        let (tape, _) = gen.finish();
        assert_eq!(tape[idx].opcode, Opcode::ParsePartCaseInsensitively);
    }

    #[test]
    fn partial_lists_count_tracks_nesting() {
        let mut gen = InstructionGenerator::new();
        gen.enter_partial_list();
        gen.enter_partial_list();
        assert_eq!(gen.partial_lists_count(), 2);
        gen.exit_partial_list();
        assert_eq!(gen.partial_lists_count(), 1);
    }
}
