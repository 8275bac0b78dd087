//! Column-aligned listings of records.
//!
//! Each column is a projection over a record. Every column but the last is
//! right-padded to its widest cell across the whole row set; widths are
//! counted in characters. Padding and gaps after a row's last non-empty cell
//! are left out, but cell text is never trimmed. An empty row set renders as
//! an empty string.

use std::fmt::Write;

use muster_foundation::Record;

/// Default separator between columns.
pub const DEFAULT_GAP: &str = "  ";

/// A projection from a record to one table cell.
pub struct Column<'f, R: ?Sized> {
    title: Option<String>,
    project: Box<dyn Fn(&R) -> String + 'f>,
}

impl<'f, R: ?Sized> Column<'f, R> {
    /// Creates an untitled column.
    pub fn new(project: impl Fn(&R) -> String + 'f) -> Self {
        Self {
            title: None,
            project: Box::new(project),
        }
    }

    /// Creates a column with a header title.
    pub fn titled(title: impl Into<String>, project: impl Fn(&R) -> String + 'f) -> Self {
        Self {
            title: Some(title.into()),
            project: Box::new(project),
        }
    }

    /// Returns the header title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Projects one record into a cell.
    pub fn cell(&self, record: &R) -> String {
        (self.project)(record)
    }
}

impl<R: Record + ?Sized> Column<'_, R> {
    /// The record's ID.
    #[must_use]
    pub fn id() -> Self {
        Self::titled("ID", |r: &R| r.id().to_string())
    }

    /// The record's display name.
    #[must_use]
    pub fn name() -> Self {
        Self::titled("Name", |r: &R| r.name().to_string())
    }

    /// The record's tags, comma separated.
    #[must_use]
    pub fn tags() -> Self {
        Self::titled("Tags", |r: &R| {
            r.tags().map(ToString::to_string).unwrap_or_default()
        })
    }
}

/// A set of columns plus layout options.
pub struct Table<'f, R: ?Sized> {
    columns: Vec<Column<'f, R>>,
    gap: String,
    show_titles: bool,
}

impl<R: ?Sized> Default for Table<'_, R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            gap: DEFAULT_GAP.to_string(),
            show_titles: false,
        }
    }
}

impl<'f, R: ?Sized> Table<'f, R> {
    /// Creates an empty table with the default gap and no header row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    #[must_use]
    pub fn with_column(mut self, column: Column<'f, R>) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the separator between columns.
    #[must_use]
    pub fn with_gap(mut self, gap: impl Into<String>) -> Self {
        self.gap = gap.into();
        self
    }

    /// Renders column titles as a header row (only when there are rows).
    #[must_use]
    pub fn with_titles(mut self) -> Self {
        self.show_titles = true;
        self
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Renders the records. Rows are joined by `\n` with no trailing newline.
    pub fn render<'r, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        let mut rows: Vec<Vec<String>> = records
            .into_iter()
            .map(|record| self.columns.iter().map(|c| c.cell(record)).collect())
            .collect();

        if rows.is_empty() || self.columns.is_empty() {
            return String::new();
        }

        if self.show_titles {
            let header = self
                .columns
                .iter()
                .map(|c| c.title().unwrap_or_default().to_string())
                .collect();
            rows.insert(0, header);
        }

        let widths: Vec<usize> = (0..self.columns.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for (n, row) in rows.iter().enumerate() {
            if n > 0 {
                out.push('\n');
            }
            // Padding stops at the last non-empty cell; cell text is kept as is.
            let end = row.iter().rposition(|cell| !cell.is_empty()).unwrap_or(0);
            for (i, cell) in row.iter().enumerate().take(end + 1) {
                if i < end {
                    let _ = write!(out, "{cell:<width$}{}", self.gap, width = widths[i]);
                } else {
                    out.push_str(cell);
                }
            }
        }
        out
    }
}

/// Renders `records` with `columns` using the default gap and no header.
pub fn format_list<'r, R, I>(records: I, columns: Vec<Column<'_, R>>) -> String
where
    R: ?Sized + 'r,
    I: IntoIterator<Item = &'r R>,
{
    columns
        .into_iter()
        .fold(Table::new(), Table::with_column)
        .render(records)
}
