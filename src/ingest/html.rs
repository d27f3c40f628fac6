//! HTML table extraction.

use scraper::{ElementRef, Html, Selector};

use super::IngestError;

/// Extract the cell text of the first `<table>` in a document.
///
/// Each `<tr>` becomes one row of its `th`/`td` cells, whitespace-trimmed.
pub fn extract_table_rows(html: &str) -> Result<Vec<Vec<String>>, IngestError> {
    let document = Html::parse_document(html);

    let table_sel = Selector::parse("table").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("th, td").expect("static selector");

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(IngestError::NoTable)?;

    let rows = table
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(|cell| cell_text(&cell)).collect())
        .collect();

    Ok(rows)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
