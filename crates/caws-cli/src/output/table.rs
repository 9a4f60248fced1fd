//! Two-column key/value layout behind `--format table`.

const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Total line width to stay within. Only values are shortened.
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render `rows` under a `key`/`value` header, keys padded to the longest one.
#[must_use]
pub fn render_key_value(rows: &[(String, String)], options: TableOptions) -> String {
    let key_width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0)
        .max("key".len());
    let value_width = options
        .max_width
        .map(|max| max.saturating_sub(key_width + GAP.len()).max(1));

    let values: Vec<String> = rows
        .iter()
        .map(|(_, value)| clip(value, value_width))
        .collect();
    let widest = values
        .iter()
        .map(|value| value.chars().count())
        .max()
        .unwrap_or(0)
        .max("value".len());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{:<key_width$}{GAP}value", "key"));
    lines.push("-".repeat(key_width + GAP.len() + widest));
    for ((key, _), value) in rows.iter().zip(values) {
        let value = if options.color { paint(value) } else { value };
        lines.push(format!("{key:<key_width$}{GAP}{value}"));
    }
    lines.join("\n")
}

fn clip(value: &str, width: Option<usize>) -> String {
    match width {
        Some(width) if value.chars().count() > width => {
            let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
            out.push('…');
            out
        }
        _ => value.to_string(),
    }
}

/// Colour login outcomes and booleans.
fn paint(value: String) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "succeeded" | "true" => "32",
        "cancelled" => "33",
        "failed" | "false" | "expired" => "31",
        _ => return value,
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn keys_are_padded_to_the_longest() {
        let out = render_key_value(&rows(&[("account_id", "acct-1"), ("label", "alice")]), PLAIN);
        assert_eq!(
            out,
            "key         value\n\
             ------------------\n\
             account_id  acct-1\n\
             label       alice"
        );
    }

    #[test]
    fn narrow_width_truncates_values_only() {
        let out = render_key_value(
            &rows(&[("label", "a label much longer than the terminal allows")]),
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let last = out.lines().last().expect("row");
        assert!(last.starts_with("label  "));
        assert!(last.ends_with('…'));
        assert_eq!(last.chars().count(), 20);
    }

    #[test]
    fn color_marks_outcomes_only() {
        let out = render_key_value(
            &rows(&[("result", "failed"), ("account", "acct-1")]),
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(out.contains("\u{1b}[31mfailed\u{1b}[0m"));
        assert!(out.contains("account  acct-1"));
    }
}
