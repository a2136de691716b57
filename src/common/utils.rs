//! Shared helpers for file persistence, path display and flag values.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Replace the contents of `path` with `contents` atomically.
///
/// The data is written to a temporary file created next to the target and
/// then renamed over it, so readers only ever see the old or the new file.
/// On error the previous file is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", path_for_display(dir)))?;
    temp.write_all(contents)
        .context("Failed to write temporary file")?;
    temp.flush().context("Failed to flush temporary file")?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path_for_display(path)))?;
    Ok(())
}

/// Serialize `value` as JSON with two-space indentation and write it atomically.
pub fn write_json_pretty<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut data = serde_json::to_vec_pretty(value).context("Failed to serialize JSON")?;
    data.push(b'\n');
    write_atomic(path, &data)
}

/// Shorten a path for display by replacing the home directory with `~`.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Parse a boolean flag value, accepting the usual spellings
/// (`1`, `t`, `true`, `TRUE`, `True` and their false counterparts).
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Translate a date layout into a `chrono` format string.
///
/// Strings already containing `%` are returned unchanged. Anything else is
/// treated as a reference-date layout (`2006/01/02`, `Jan 2, 2006`, ...) and
/// its tokens are mapped onto strftime specifiers.
pub fn to_strftime(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    // Longest tokens first so "2006" wins over "2" and "01" over "1".
    const TOKENS: [(&str, &str); 14] = [
        ("2006", "%Y"),
        ("January", "%B"),
        ("Monday", "%A"),
        ("Jan", "%b"),
        ("Mon", "%a"),
        ("01", "%m"),
        ("02", "%d"),
        ("06", "%y"),
        ("15", "%H"),
        ("03", "%I"),
        ("04", "%M"),
        ("05", "%S"),
        ("PM", "%p"),
        ("_2", "%e"),
    ];

    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'outer: while !rest.is_empty() {
        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        // Single-digit month/day tokens.
        if let Some(tail) = rest.strip_prefix('1') {
            out.push_str("%-m");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('2') {
            out.push_str("%-d");
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }
    }
    out
}
