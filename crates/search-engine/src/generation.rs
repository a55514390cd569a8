//! Generation naming.
//!
//! A generation is named `{alias}-{expanded pattern}`, where `{{token}}`
//! occurrences in the configured pattern expand to UTC date/time components.
//! The default pattern `{{YYYYMMDD}}-{{HHmmss}}` produces names like
//! `catalog-20240309-143005`.

use chrono::{DateTime, Utc};

/// Expand `{{token}}` occurrences in a generation-name pattern.
///
/// Text outside `{{ }}` passes through unchanged; an unterminated `{{` is
/// kept literally.
pub fn expand_pattern(pattern: &str, now: DateTime<Utc>) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                out.push_str(&format_token(&after[..end], now));
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Format one token. Runs of the same pattern letter map to the matching
/// UTC component (`YYYY`/`YY`, `MM`, `DD`, `HH`, `mm`, `ss`); unrecognized
/// runs pass through unchanged.
fn format_token(token: &str, now: DateTime<Utc>) -> String {
    let chars: Vec<char> = token.chars().collect();
    let mut fmt = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        match (c, run) {
            ('Y', 4) => fmt.push_str("%Y"),
            ('Y', 2) => fmt.push_str("%y"),
            ('M', 2) => fmt.push_str("%m"),
            ('D', 2) => fmt.push_str("%d"),
            ('H', 2) => fmt.push_str("%H"),
            ('m', 2) => fmt.push_str("%M"),
            ('s', 2) => fmt.push_str("%S"),
            _ => {
                for _ in 0..run {
                    if c == '%' {
                        fmt.push_str("%%");
                    } else {
                        fmt.push(c);
                    }
                }
            }
        }
        i += run;
    }

    now.format(&fmt).to_string()
}
