// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! Error types for the Avail message splitter.
//!
//! Mirrors the two disjoint failure kinds from the splitter's error-handling
//! design: a [`MalformedMessage`] (lexer/parser failure, carries a code, a
//! human-readable message, and the [`Position`] of the offending code point)
//! and a [`SignatureError`] (signature-checker failure, carries a code only).
//! Both are fatal for the call that produced them and never carry a
//! default/fallback value — see `spec.md` §7.
//!
//! The shape (`XError::variant_name(args).into()` constructors, a shared
//! `Result` alias) follows `leo_errors`' `create_messages!`-generated error
//! enums, with `thiserror` driving `Display`/`std::error::Error` instead of
//! reimplementing that code-generation macro.

#![forbid(unsafe_code)]

mod malformed;
mod signature;

pub use malformed::{MalformedCode, MalformedMessage};
pub use signature::{SignatureError, SignatureErrorCode};

use avail_splitter_span::Position;
use std::fmt;

/// The error type produced anywhere in the splitter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplitterError {
    /// The name string itself could not be lexed or parsed.
    #[error(transparent)]
    Malformed(#[from] MalformedMessage),
    /// A name parsed fine, but the signature offered at a call site does not
    /// match its grammar.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl SplitterError {
    /// The [`Position`] to highlight for this error, if any.
    ///
    /// Signature errors carry no position (per §7, they carry the code only);
    /// callers that need a highlight for those should fall back to
    /// `MessageSplitter::name_highlighting_pc`.
    pub fn position(&self) -> Position {
        match self {
            SplitterError::Malformed(m) => m.position,
            SplitterError::Signature(_) => Position::NONE,
        }
    }
}

/// The splitter's `Result` alias, analogous to `leo_errors::Result`.
pub type Result<T> = std::result::Result<T, SplitterError>;

/// Helper implementing `Display` for a `SCREAMING_SNAKE_CASE` error code enum
/// whose variants are already named after the wire-format code.
pub(crate) fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

pub(crate) fn fmt_code(f: &mut fmt::Formatter<'_>, variant_debug: &str) -> fmt::Result {
    write!(f, "{}", screaming_snake(variant_debug))
}
