//! Note content constraints.

/// Maximum length of note text in characters.
pub const MAX_NOTE_TEXT_LENGTH: usize = 10_000;

/// Validate note text: non-blank and within [`MAX_NOTE_TEXT_LENGTH`].
pub fn validate_note_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Note text must not be blank".to_string());
    }
    let len = text.chars().count();
    if len > MAX_NOTE_TEXT_LENGTH {
        return Err(format!(
            "Note text exceeds maximum length of {MAX_NOTE_TEXT_LENGTH} characters (got {len})"
        ));
    }
    Ok(())
}
