//! Subcommand handlers.
//!
//! Each command is implemented as a separate function for maintainability.

#![allow(clippy::unnecessary_wraps)] // Uniform signature for dispatch from main

use std::process::ExitCode;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use vecarch_core::{ArchId, SupportedArch};

pub fn list(snapshot: &SupportedArch, only_available: bool) -> anyhow::Result<ExitCode> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Tag", "Family", "Width", "Builds on", "Available"]);

    for id in ArchId::ALL {
        let usable = snapshot.has(id);
        if only_available && !usable {
            continue;
        }
        let bases = id
            .bases()
            .iter()
            .map(|base| base.name())
            .collect::<Vec<_>>()
            .join(", ");
        let status = if usable {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(id.name()),
            Cell::new(id.family()),
            Cell::new(format!("{} bits", id.width_bits())),
            Cell::new(bases),
            status,
        ]);
    }

    println!("{table}");
    Ok(ExitCode::SUCCESS)
}

pub fn json(snapshot: &SupportedArch) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(ExitCode::SUCCESS)
}

pub fn check(snapshot: &SupportedArch, tag: &str) -> anyhow::Result<ExitCode> {
    let id: ArchId = tag.parse()?;
    if snapshot.has(id) {
        println!("{}: {}", id, "available".green());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: {}", id, "unavailable".red());
        Ok(ExitCode::FAILURE)
    }
}

pub fn best(snapshot: &SupportedArch) -> anyhow::Result<ExitCode> {
    match snapshot.best() {
        Some(id) => println!("{id}"),
        None => println!("none"),
    }
    Ok(ExitCode::SUCCESS)
}
