//! Text shaping helpers for rendered content.

/// Splits overview text into paragraphs: one per non-blank line.
pub fn overview_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Wraps a formula in display-math delimiters.
pub fn display_formula(formula: &str) -> String {
    format!("$${formula}$$")
}

/// `Some(trimmed)` when the field carries text worth rendering.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
