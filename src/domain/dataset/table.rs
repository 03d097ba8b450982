/// Render right-aligned columns separated by two spaces, header first.
/// When `row_labels` is given, a left-aligned label column is prepended.
pub(crate) fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
    row_labels: Option<&[&str]>,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let label_width = row_labels
        .map(|labels| labels.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    lines.push(render_line(
        row_labels.map(|_| ""),
        label_width,
        &header_cells,
        &widths,
    ));

    for (index, row) in rows.iter().enumerate() {
        let label = row_labels.map(|labels| labels.get(index).copied().unwrap_or(""));
        lines.push(render_line(label, label_width, row, &widths));
    }

    lines.join("\n")
}

fn render_line(label: Option<&str>, label_width: usize, cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len() + 1);

    if let Some(label) = label {
        parts.push(format!("{:<width$}", label, width = label_width));
    }

    for (cell, width) in cells.iter().zip(widths) {
        parts.push(format!("{:>width$}", cell, width = *width));
    }

    parts.join("  ").trim_end().to_string()
}
