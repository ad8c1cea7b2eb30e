use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::ReaderBuilder;

use super::table::TextTable;
use super::ExtractionError;

/// Parse comma-delimited bytes, first row as header.
///
/// Short rows are padded with missing cells; a row wider than the header is
/// an error.
pub fn csv_table(bytes: &[u8]) -> Result<TextTable, ExtractionError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<Option<String>> = rdr
        .headers()
        .map_err(|e| ExtractionError::Csv(e.to_string()))?
        .iter()
        .map(non_blank)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ExtractionError::Csv(e.to_string()))?;
        if record.len() > header.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ExtractionError::Csv(format!(
                "expected {} fields in line {}, saw {}",
                header.len(),
                line,
                record.len()
            )));
        }
        rows.push(record.iter().map(non_blank).collect());
    }

    TextTable::new(header, rows)
}

/// Parse the first worksheet of an xlsx/xls/xlsb/ods workbook.
pub fn excel_table(bytes: &[u8]) -> Result<TextTable, ExtractionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ExtractionError::Excel(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractionError::Excel("workbook has no worksheets".to_string()))?
        .map_err(|e| ExtractionError::Excel(e.to_string()))?;

    range_table(&range)
}

/// The range only covers used cells, so blank leading columns are put back
/// as missing cells. Blank leading rows are skipped, as are blank lines in CSV.
pub fn range_table(range: &Range<Data>) -> Result<TextTable, ExtractionError> {
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or_default();
    let mut rows = range.rows().map(|row| {
        std::iter::repeat(None)
            .take(col_offset)
            .chain(row.iter().map(cell_text))
            .collect::<Vec<_>>()
    });

    let header = rows.next().unwrap_or_default();
    // A fully blank header row carries no column names
    if header.iter().all(Option::is_none) {
        return Err(ExtractionError::NoColumns);
    }

    TextTable::new(header, rows.collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => non_blank(&other.to_string()),
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
