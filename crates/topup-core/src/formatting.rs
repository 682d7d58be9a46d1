/// Indentation unit repeated once per nesting level in the report.
pub const INDENT: &str = "\t";

/// Build one newline-terminated report line.
///
/// The label is prefixed with `level` indentation units. When `value` is
/// present it follows the label after `": "`.
///
/// # Examples
///
/// ```
/// use topup_core::formatting::format_line;
///
/// assert_eq!(format_line("Company Id", Some("1"), 1), "\tCompany Id: 1\n");
/// assert_eq!(format_line("Users Emailed", None, 1), "\tUsers Emailed\n");
/// ```
pub fn format_line(label: &str, value: Option<&str>, level: usize) -> String {
    let mut line = INDENT.repeat(level);
    line.push_str(label);
    if let Some(value) = value {
        line.push_str(": ");
        line.push_str(value);
    }
    line.push('\n');
    line
}

// ── Tests ──────────────────────────────────────────────────────────────────────
