//! HTML table to structured rows.
//!
//! A table with `th` header cells becomes an array of objects keyed by
//! header text; a table without headers becomes an array of arrays.

use scraper::Html;
use serde_json::{Map, Value};

use crate::parse::Element;
use crate::text::element_text;

/// Converts every table in an HTML fragment, in document order.
pub fn convert_tables(html: &str) -> Vec<Value> {
    let fragment = Html::parse_fragment(html);
    let root = Element::from(fragment.root_element());

    root.select("table")
        .unwrap_or_default()
        .iter()
        .map(convert_table)
        .collect()
}

/// Converts a single table element.
pub fn convert_table(table: &Element<'_>) -> Value {
    let rows = table.select("tr").unwrap_or_default();

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for row in &rows {
        let header_cells = row.select("th").unwrap_or_default();
        if headers.is_empty() && !header_cells.is_empty() {
            headers = header_cells.iter().map(element_text).collect();
            continue;
        }

        let cells: Vec<String> = row.select("td").unwrap_or_default().iter().map(element_text).collect();
        if cells.is_empty() {
            continue;
        }

        records.push(if headers.is_empty() { row_array(cells) } else { row_object(&headers, cells) });
    }

    Value::Array(records)
}

fn row_array(cells: Vec<String>) -> Value {
    Value::Array(cells.into_iter().map(Value::String).collect())
}

fn row_object(headers: &[String], cells: Vec<String>) -> Value {
    let mut record = Map::new();
    for (index, cell) in cells.into_iter().enumerate() {
        let key = headers.get(index).cloned().unwrap_or_else(|| index.to_string());
        record.insert(key, Value::String(cell));
    }
    Value::Object(record)
}
