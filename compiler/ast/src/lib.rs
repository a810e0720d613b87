// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The typed tree a message name parses into, and the small closed type
//! model the signature checker and instruction emitter check and unroll
//! against (`spec.md` §3, §9).
//!
//! Laid out the way `leo_ast` separates its expression tree from its type
//! representation: one crate, one module per concern, re-exported flat from
//! the crate root for downstream crates (`avail_splitter_parser`,
//! `avail_splitter_passes`) to use without reaching into submodules.

#![forbid(unsafe_code)]

pub mod expression;
pub mod ordinal;
pub mod part;
pub mod types;

pub use expression::{
    Alternation, ArgumentExpr, ArgumentKind, CaseInsensitive, CompletelyOptional, Expression, Group, NumberedChoice,
    Optional, RawTokenExpr, RawTokenKind, SectionCheckpoint, Sequence, Simple, UNSET_ORDINAL,
};
pub use ordinal::{permutation_from_ordinals, ReorderMode, NO_ORDINAL};
pub use part::MessagePart;
pub use types::{SizeRange, Type, TupleShape};
