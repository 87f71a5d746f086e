use std::io::{self, Write};

use core_types::HistoryEntry;

/// Prints one `Visited:` line per entry, oldest first. Returns the number
/// of lines written.
pub fn write_history<W: Write>(out: &mut W, entries: &[HistoryEntry]) -> io::Result<usize> {
    for entry in entries {
        writeln!(out, "Visited:  {}", entry.url)?;
    }
    out.flush()?;
    Ok(entries.len())
}
