#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Truncates a string slice to the new length.
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Adds padding to the string slice.
pub fn add_padding(s: &str, width: usize) -> String {
    let name_width = s.chars().count();

    let mut text = String::with_capacity(width);
    text.push_str(truncate(s, width));

    let padding_len = width.saturating_sub(name_width);
    text.extend(std::iter::repeat_n(' ', padding_len));

    text
}

/// Renders rows as a plain text table with columns separated by `gap` spaces.\
/// **Note** that the last column is never padded.
pub fn render_table<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>], gap: usize) -> Vec<String> {
    let mut widths = header.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = AsRef::<str>::as_ref(cell).chars().count();
            if i < widths.len() {
                widths[i] = widths[i].max(len);
            } else {
                widths.push(len);
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(header.iter().copied(), &widths, gap));
    for row in rows {
        lines.push(render_row(row.iter().map(AsRef::<str>::as_ref), &widths, gap));
    }

    lines
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], gap: usize) -> String {
    let cells = cells.collect::<Vec<_>>();
    let last = cells.len().saturating_sub(1);

    let mut line = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&add_padding(cell, widths[i] + gap));
        }
    }

    line
}
