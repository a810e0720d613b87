// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The `avail-splitter` CLI: a small inspection tool over
//! [`avail_splitter::MessageSplitter`], grounded on the `clap`-derive +
//! `tracing-subscriber` idiom every CLI-shaped crate in this workspace's
//! reference material shares, rather than on `leo`'s own binary crate
//! directly (it was only sparsely available to draw from).

use avail_splitter::{MessageSplitter, Type, TupleShape};
use clap::Parser;

/// Inspect an Avail method name's embedded grammar.
#[derive(Parser, Debug)]
#[command(name = "avail-splitter", version, about)]
struct Cli {
    /// The method name to split, e.g. `"Foo_:_«_,»bar_:"`.
    name: String,

    /// Number of arguments to assume when emitting an instruction listing
    /// (each is typed `any`). Omit to only print structural facts.
    #[arg(long)]
    emit: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let splitter = match MessageSplitter::new(&cli.name) {
        Ok(splitter) => splitter,
        Err(err) => {
            eprintln!("{} is malformed: {err}", cli.name);
            std::process::exit(1);
        }
    };

    println!("name: {}", splitter.name());
    println!("arguments: {}", splitter.number_of_arguments());
    println!("underscores: {}", splitter.number_of_underscores());
    println!("section checkpoints: {}", splitter.number_of_section_checkpoints());
    println!("contains groups: {}", splitter.contains_groups());

    if let Some(count) = cli.emit {
        let ty = Type::Tuple(TupleShape::fixed(vec![Type::Any; count]));
        match splitter.instructions_for(&ty) {
            Ok(instructions) => {
                for (pc, instruction) in instructions.iter().enumerate() {
                    println!("{pc:>4}: {instruction}");
                }
            }
            Err(err) => {
                eprintln!("cannot emit for {count} argument(s): {err}");
                std::process::exit(1);
            }
        }
    }
}
