//! Terminal rendering of the projected UI surface.
//!
//! Rendering is a dumb transcription of [`UiState`] plus the raw field
//! values; every decision about labels, enablement, and messages was already
//! made by the projection.

use std::io::{self, Write};

use vestibule_core::FormController;

fn lock_suffix(enabled: bool) -> &'static str {
    if enabled { "" } else { "  (locked)" }
}

/// Write the current form surface to `out`.
///
/// # Errors
///
/// Propagates I/O errors from the writer.
pub fn render(form: &FormController, out: &mut impl Write) -> io::Result<()> {
    let ui = form.ui();

    writeln!(out)?;
    writeln!(out, "── sign in ─────────────────────────────────────")?;
    writeln!(out, "  identity: {}", form.identity())?;
    if let Some(msg) = &ui.identity_error {
        writeln!(out, "            ! {msg}")?;
    }
    writeln!(out, "  code:     {}", form.code())?;
    if let Some(msg) = &ui.code_error {
        writeln!(out, "            ! {msg}")?;
    }
    writeln!(out, "  [ {} ]{}", ui.send_label, lock_suffix(ui.send_enabled))?;
    writeln!(out, "  [ {} ]{}", ui.submit_label, lock_suffix(ui.submit_enabled))?;
    if let Some(line) = &ui.countdown {
        writeln!(out, "  {line}")?;
    }
    if let Some(line) = &ui.status {
        writeln!(out, "  {line}")?;
    }
    out.flush()
}
