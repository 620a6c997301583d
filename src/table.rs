//! Elastic text tables for terminal output.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Column-aligned table rendered with two-space gutters and a dashed separator.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect::<Vec<_>>();
        let aligns = vec![Align::Left; headers.len()];
        Self {
            headers,
            aligns,
            rows: Vec::new(),
        }
    }

    /// Right-aligns the column at `index`, typically one holding counts.
    pub fn align(mut self, index: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(index) {
            *slot = align;
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths = self
            .headers
            .iter()
            .map(|h| display_width(h).max(1))
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", self.format_line(&self.headers, &widths));
        let separator = widths
            .iter()
            .map(|w| "-".repeat((*w).max(3)))
            .collect::<Vec<_>>();
        let _ = writeln!(output, "{}", separator.join("  "));
        for row in &self.rows {
            let _ = writeln!(output, "{}", self.format_line(row, &widths));
        }
        output
    }

    fn format_line(&self, values: &[String], widths: &[usize]) -> String {
        let mut line = values
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((value, width), align)| {
                let cell = sanitize_cell(value);
                let padding = " ".repeat(width.saturating_sub(display_width(&cell)));
                match align {
                    Align::Left => format!("{cell}{padding}"),
                    Align::Right => format!("{padding}{cell}"),
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        while line.ends_with(' ') {
            line.pop();
        }
        line
    }
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // ANSI escape, e.g. \x1b[31m
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_aligns_columns() {
        let mut table = TextTable::new(["id", "name"]).align(0, Align::Right);
        table.push_row(vec!["1".to_string(), "Alice".to_string()]);
        table.push_row(vec!["22".to_string(), "Bob".to_string()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["id  name", "---  -----", " 1  Alice", "22  Bob"]);
    }

    #[test]
    fn render_flattens_control_characters_and_skips_ansi() {
        let mut table = TextTable::new(["note", "status"]);
        table.push_row(vec![
            "line1\nline2".to_string(),
            "\u{1b}[31mERR\u{1b}[0m".to_string(),
        ]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "line1 line2  \u{1b}[31mERR\u{1b}[0m");
    }
}
