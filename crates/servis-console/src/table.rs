use servis_core::{Column, Record, RenderOptions, SortDirection, sort_records};

/// Widest a cell may render before it is cut with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("bilinmeyen sütun: {0}")]
    UnknownColumn(String),

    #[error("sayfa {page} yok (toplam {pages})")]
    PageOutOfRange { page: usize, pages: usize },
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Column (dot path or title) and needle.
    pub filter: Option<(String, String)>,
    pub sort: Option<(String, SortDirection)>,
    pub render: RenderOptions,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            filter: None,
            sort: None,
            render: RenderOptions::default(),
        }
    }
}

/// Find a column by dot path, falling back to a case-insensitive title match.
pub fn find_column<'a>(columns: &'a [Column], key: &str) -> Option<&'a Column> {
    columns
        .iter()
        .find(|c| c.path.dotted() == key)
        .or_else(|| columns.iter().find(|c| c.title.to_lowercase() == key.to_lowercase()))
}

/// Filter, sort and page `records`, returning the rows that survive.
pub fn select_rows(
    columns: &[Column],
    records: &[Record],
    options: &TableOptions,
) -> Result<(Vec<Record>, usize), TableError> {
    let mut rows: Vec<Record> = match &options.filter {
        Some((key, needle)) => {
            let column = lookup(columns, key)?;
            records
                .iter()
                .filter(|r| column.matches(r, needle))
                .cloned()
                .collect()
        }
        None => records.to_vec(),
    };
    if let Some((key, direction)) = &options.sort {
        sort_records(&mut rows, lookup(columns, key)?, *direction);
    }

    let total = rows.len();
    let page_size = options.page_size.max(1);
    let pages = total.div_ceil(page_size).max(1);
    let page = options.page.max(1);
    if page > pages {
        return Err(TableError::PageOutOfRange { page, pages });
    }
    let rows = rows
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Ok((rows, total))
}

/// Aligned plain-text grid with a paging footer.
pub fn render_table(
    columns: &[Column],
    records: &[Record],
    options: &TableOptions,
) -> Result<String, TableError> {
    let (rows, total) = select_rows(columns, records, options)?;

    let header: Vec<String> = columns.iter().map(|c| clip(&c.title)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| clip(&c.render(record, &options.render).to_string()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    if body.is_empty() {
        out.push_str("Kayıt yok\n");
    }
    for row in &body {
        push_row(&mut out, row, &widths);
    }

    let page_size = options.page_size.max(1);
    let pages = total.div_ceil(page_size).max(1);
    out.push_str(&format!("Sayfa {}/{pages} · {total} kayıt", options.page.max(1)));
    Ok(out)
}

fn lookup<'a>(columns: &'a [Column], key: &str) -> Result<&'a Column, TableError> {
    find_column(columns, key).ok_or_else(|| TableError::UnknownColumn(key.to_string()))
}

fn clip(text: &str) -> String {
    let flat = text.replace(['\n', '\r', '\t'], " ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use servis_core::{FieldPath, PREFERRED_ORDER, Titles, build_columns, build_field_paths};

    fn records() -> Vec<Record> {
        (1..=25)
            .map(|i| {
                let city = if i % 2 == 0 { "Bursa" } else { "İzmir" };
                json!({ "id": i, "name": format!("Müşteri {i:02}"), "city": city })
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect()
    }

    fn columns(records: &[Record]) -> Vec<Column> {
        build_columns(&build_field_paths(records), &Titles::turkish(), &PREFERRED_ORDER)
    }

    #[test]
    fn pages_of_ten() {
        let recs = records();
        let cols = columns(&recs);
        let text = render_table(&cols, &recs, &TableOptions::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 10 + 1);
        assert!(lines[0].starts_with("ID"));
        assert_eq!(lines.last(), Some(&"Sayfa 1/3 · 25 kayıt"));

        let last = TableOptions {
            page: 3,
            ..TableOptions::default()
        };
        let (rows, _) = select_rows(&cols, &recs, &last).unwrap();
        assert_eq!(rows.len(), 5);
        let text = render_table(&cols, &recs, &last).unwrap();
        assert!(text.ends_with("Sayfa 3/3 · 25 kayıt"));
    }

    #[test]
    fn filter_then_sort_descending() {
        let recs = records();
        let cols = columns(&recs);
        let options = TableOptions {
            filter: Some(("city".into(), "bur".into())),
            sort: Some(("ID".into(), SortDirection::Desc)),
            ..TableOptions::default()
        };
        let (rows, total) = select_rows(&cols, &recs, &options).unwrap();
        assert_eq!(total, 12);
        assert_eq!(rows[0]["id"], 24);
    }

    #[test]
    fn unknown_column_and_page() {
        let recs = records();
        let cols = columns(&recs);
        let bad_column = TableOptions {
            sort: Some(("nope".into(), SortDirection::Asc)),
            ..TableOptions::default()
        };
        assert!(matches!(
            render_table(&cols, &recs, &bad_column),
            Err(TableError::UnknownColumn(_))
        ));
        let bad_page = TableOptions {
            page: 9,
            ..TableOptions::default()
        };
        assert!(matches!(
            render_table(&cols, &recs, &bad_page),
            Err(TableError::PageOutOfRange { page: 9, pages: 3 })
        ));
    }

    #[test]
    fn empty_list_shows_default_headers() {
        let cols = columns(&[]);
        let text = render_table(&cols, &[], &TableOptions::default()).unwrap();
        assert!(text.contains("Kayıt yok"));
        assert!(text.ends_with("Sayfa 1/1 · 0 kayıt"));
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(60);
        let rec = json!({ "note": long }).as_object().cloned().unwrap();
        let cols = vec![Column::new(FieldPath::parse("note"), "Not".into())];
        let text = render_table(&cols, &[rec], &TableOptions::default()).unwrap();
        let row = text.lines().nth(2).unwrap();
        assert_eq!(row.chars().count(), MAX_CELL_WIDTH);
        assert!(row.ends_with('…'));
    }
}
