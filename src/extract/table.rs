use super::ExtractionError;

/// Rows of a spreadsheet-like source, rendered as a right-aligned text table.
///
/// The first source row becomes the header. Missing or empty cells are kept
/// as `None` and printed as `NaN`; header cells that are blank are named
/// `Unnamed: {index}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

const MISSING: &str = "NaN";

impl TextTable {
    pub fn new(
        header: Vec<Option<String>>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<Self, ExtractionError> {
        if header.is_empty() {
            return Err(ExtractionError::NoColumns);
        }

        let columns = header
            .into_iter()
            .enumerate()
            .map(|(idx, name)| name.unwrap_or_else(|| format!("Unnamed: {}", idx)))
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render without a row index, one space between columns.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: []",
                self.columns.join(", ")
            );
        }

        let width = self.columns.len();
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (idx, w) in widths.iter_mut().enumerate() {
                *w = (*w).max(self.cell(row, idx).chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(Self::render_line(self.columns.iter().map(String::as_str), &widths));
        for row in &self.rows {
            lines.push(Self::render_line((0..width).map(|idx| self.cell(row, idx)), &widths));
        }
        lines.join("\n")
    }

    fn cell<'a>(&self, row: &'a [Option<String>], idx: usize) -> &'a str {
        row.get(idx)
            .and_then(|c| c.as_deref())
            .unwrap_or(MISSING)
    }

    fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        cells
            .zip(widths)
            .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
