use std::io::Write;

use crate::protocol::DisplayMessage;

use super::error::HandlerError;

pub fn handle_display<W: Write>(
    out: &mut W,
    msg: &DisplayMessage<'_>,
) -> Result<(), HandlerError> {
    let text = render_text(msg.payload())?;
    writeln!(out, "Display message: {}", text)?;
    Ok(())
}

/// Render untrusted payload bytes as printable text.
///
/// Exactly `payload.len()` bytes are read. Invalid UTF-8 is replaced and
/// control characters are escaped so the output stays on one line. The
/// escaped size is measured first and reserved fallibly.
pub fn render_text(payload: &[u8]) -> Result<String, HandlerError> {
    let needed = rendered_len(payload);
    let mut text = String::new();
    text.try_reserve_exact(needed)
        .map_err(|_| HandlerError::AllocationFailure { requested: needed })?;
    for ch in rendered_chars(payload) {
        if ch.is_control() {
            text.extend(ch.escape_default());
        } else {
            text.push(ch);
        }
    }
    Ok(text)
}

// One replacement character per invalid sequence, as `String::from_utf8_lossy`.
fn rendered_chars(payload: &[u8]) -> impl Iterator<Item = char> + '_ {
    payload.utf8_chunks().flat_map(|chunk| {
        let replacement =
            (!chunk.invalid().is_empty()).then_some(char::REPLACEMENT_CHARACTER);
        chunk.valid().chars().chain(replacement)
    })
}

fn rendered_len(payload: &[u8]) -> usize {
    rendered_chars(payload)
        .map(|ch| {
            if ch.is_control() {
                ch.escape_default().len()
            } else {
                ch.len_utf8()
            }
        })
        .sum()
}
