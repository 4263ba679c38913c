#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 5;

/// Render an aligned table of string cells.
///
/// Numeric and price cells are right-aligned. With `color`, known status
/// tokens (`clean`, `flagged`, `true`, ...) are highlighted.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false, None))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let text = truncate(cell, *width);
                let color = if options.color { status_color(&text) } else { None };
                pad(&text, *width, right_aligned(&text), color)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}

/// Shrink the widest columns one char at a time until the row fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn right_aligned(value: &str) -> bool {
    let trimmed = value.trim().trim_start_matches('$');
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right: bool, color: Option<&str>) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    let text = match color {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    };
    if right {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn status_color(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "clean" | "true" | "authenticated" | "configured" | "ok" => Some("32"),
        "pending" | "disabled" | "keyring" | "env" | "file" => Some("33"),
        "flagged" | "blocked" | "false" | "missing" | "error" => Some("31"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn prices_and_counts_align_right() {
        let rows = vec![
            vec!["A".to_string(), "$9".to_string()],
            vec!["B".to_string(), "$149".to_string()],
        ];
        let table = render_table(&["title", "price"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].ends_with("   $9"));
        assert!(lines[3].ends_with(" $149"));
    }

    #[test]
    fn long_cells_are_truncated_to_fit() {
        let rows = vec![vec![
            "a very long listing title that does not fit".to_string(),
            "x".to_string(),
        ]];
        let table = render_table(
            &["title", "id"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 20));
        assert!(table.contains('…'));
    }

    #[test]
    fn status_tokens_are_colored_only_when_enabled() {
        let rows = vec![vec!["clean".to_string()]];
        let colored = render_table(
            &["status"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(colored.contains("\u{1b}[32mclean"));
        assert!(!render_table(&["status"], &rows, PLAIN).contains('\u{1b}'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["only".to_string()]];
        let table = render_table(&["a", "b"], &rows, PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.trim_end().ends_with('-')));
    }
}
