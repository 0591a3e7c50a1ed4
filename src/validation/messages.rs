//! Validation failure messages
//!
//! Maps a failed rule and its context to a templated, human-readable string.
//! Templates carry `:placeholder` tokens substituted from the rule's
//! parameters; placeholders with no matching substitution are left intact.

use serde_json::Value;

use super::rules::{Rule, is_empty_value};

/// The message template for a rule
pub fn template(rule: &Rule) -> &'static str {
    match rule {
        Rule::Optional => "",
        Rule::Required => "The :field is required",
        Rule::Str => "The :field must contain only letters",
        Rule::Number => "The :field must contain only digits",
        Rule::Min(_) => "The :field must be at least :min characters",
        Rule::Max(_) => "The :field must not exceed :max characters",
        Rule::Size(_) => "The :field must be exactly :size characters",
        Rule::Digits(_) => "The :field must be exactly :digits digits",
        Rule::MinDigits(_) => "The :field must contain at least :minDigit digits",
        Rule::MaxDigits(_) => "The :field must contain no more than :maxDigit digits",
        Rule::Word { .. } => "The :field must be between :min and :max words",
        Rule::Pattern(_) => "The :field contains invalid format. Please check your input",
        Rule::Email => "The provided email address is invalid",
        Rule::Password => "Password must contain uppercase, lowercase, special character, and digit",
        Rule::Phone => "Enter a valid phone number (10-digits)",
        Rule::Url => "The :field contains an invalid URL address",
        Rule::Date { .. } => "The :field contains an invalid date or time",
        Rule::RollNo => "The :field must be in the format (21SW066)",
        Rule::Cnic => "The :field must be exactly 13 digits",
        Rule::ProjectCode => "Invalid project ID format. Use XX-001",
        Rule::Same(_) => "The :field should be the same as :same",
        Rule::Matches(_) => "The :field must be ':match'",
        Rule::In(_) => "The :field must be one of the following (:in)",
        Rule::Exclude(_) => "The :field must not match any of the following (:exclude)",
        Rule::Id => "The :field must be a valid document ID",
        Rule::Unique { .. } => "The :field ':value' is already taken",
        Rule::Exists { .. } => "The :field :value is invalid",
        Rule::Extension(_) => "The :field must be in one of the following extensions (:extension)",
        Rule::FileSize(_) => "The file size must not exceed :filesize",
    }
}

/// Render the failure message for `rule` applied to `field`/`value`
pub fn render(rule: &Rule, field: &str, value: &Value) -> String {
    let mut vars: Vec<(&str, String)> = vec![
        ("field", humanize(field)),
        ("value", display_value(value)),
    ];

    match rule {
        Rule::Min(min) => vars.push(("min", min.to_string())),
        Rule::Max(max) => vars.push(("max", max.to_string())),
        Rule::Size(size) => vars.push(("size", size.to_string())),
        Rule::Digits(digits) => vars.push(("digits", digits.to_string())),
        Rule::MinDigits(min) => vars.push(("minDigit", min.to_string())),
        Rule::MaxDigits(max) => vars.push(("maxDigit", max.to_string())),
        Rule::Word { min, max } => {
            if let Some(min) = min {
                vars.push(("min", min.to_string()));
            }
            if let Some(max) = max {
                vars.push(("max", max.to_string()));
            }
        }
        Rule::Same(other) => vars.push(("same", humanize(other))),
        Rule::Matches(literal) => vars.push(("match", literal.clone())),
        Rule::In(options) => vars.push(("in", options.join(", "))),
        Rule::Exclude(others) => vars.push((
            "exclude",
            others
                .iter()
                .filter(|v| !is_empty_value(v))
                .map(display_value)
                .collect::<Vec<_>>()
                .join(", "),
        )),
        Rule::Extension(allowed) => vars.push(("extension", allowed.join(", "))),
        Rule::FileSize(max_kb) => vars.push(("filesize", format_file_size(*max_kb))),
        _ => {}
    }

    substitute(template(rule), &vars)
}

/// Substitute `:name` tokens from `vars`, leaving unknown tokens intact
fn substitute(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after.len());
        let name = &after[..end];

        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, replacement)) => out.push_str(replacement),
            None => {
                out.push(':');
                out.push_str(name);
            }
        }
        rest = &after[end..];
    }

    out.push_str(rest);
    out
}

/// Convert a compact identifier to space-separated lowercase words
/// ("rollNo" -> "roll no")
fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_uppercase() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Render a kilobyte count in the most fitting unit
fn format_file_size(kb: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB"];
    let mut size = kb as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}s", size, UNITS[unit])
}
