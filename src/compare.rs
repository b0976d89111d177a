use anyhow::Result;
use crate::error::E2eError;

/// Collapse every whitespace run (`\r\n`, `\n`, `\t`, ...) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare CLI output against an expected literal, ignoring line-ending and
/// indentation differences.
pub fn compare_normalized_strings(actual: &str, expected: &str) -> Result<()> {
    let normalized_actual = normalize_whitespace(actual);
    let normalized_expected = normalize_whitespace(expected);

    if normalized_actual != normalized_expected {
        return Err(E2eError::Mismatch {
            expected: normalized_expected,
            actual: normalized_actual,
        }
        .into());
    }

    Ok(())
}
