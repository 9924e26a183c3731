// ABOUTME: Output helpers for rx-cli
// ABOUTME: Prints results as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Print a value as pretty JSON followed by a newline
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
