//! CSV snapshot import/export.
//!
//! Import matches cells to fields by lower-cased header name, in whatever
//! column order the file declares. Export always emits the fixed
//! 11-column schema. Both directions go through the `csv` crate so fields
//! with embedded commas are quoted instead of corrupting the parse.

use log::{debug, info, warn};

use crate::error::Result;
use crate::models::Item;

/// Fixed export column order.
pub const EXPORT_HEADERS: [&str; 11] = [
    "name",
    "category",
    "subcategory",
    "brand",
    "model",
    "quantity",
    "unit",
    "location",
    "condition",
    "notes",
    "photo_url",
];

/// Marker inside a public object URL; everything after it is
/// `{bucket}/{key}`.
const PUBLIC_OBJECT_MARKER: &str = "/storage/v1/object/public/";

/// Parses CSV text into items.
///
/// The first record is the header row. Header names are trimmed and
/// lower-cased, then matched to item fields by name; unknown headers are
/// ignored. Rows shorter than the header populate missing fields with
/// empty string / zero. `quantity` coerces to an integer, 0 on parse
/// failure.
pub fn parse_items(text: &str) -> Result<Vec<Item>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();
    debug!("CSV headers: {:?}", headers);

    let mut items = Vec::new();
    for (row_num, record) in reader.records().enumerate() {
        let record = record?;
        let mut item = Item {
            quantity: 0,
            ..Default::default()
        };

        for (index, header) in headers.iter().enumerate() {
            let value = record.get(index).unwrap_or("").trim();
            match header.as_str() {
                "name" => item.name = value.to_string(),
                "category" => item.category = value.to_string(),
                "subcategory" => item.subcategory = value.to_string(),
                "brand" => item.brand = value.to_string(),
                "model" => item.model = value.to_string(),
                "quantity" => item.quantity = value.parse().unwrap_or(0),
                "unit" => item.unit = value.to_string(),
                "location" => item.location = value.to_string(),
                "condition" => item.condition = value.to_string(),
                "notes" => item.notes = value.to_string(),
                "photo_ref" => item.photo_ref = value.to_string(),
                "photo_url" => item.photo_ref = strip_public_url(value).to_string(),
                other => debug!("Ignoring unknown CSV column: {}", other),
            }
        }

        if item.name.trim().is_empty() {
            warn!("CSV row {} has an empty name", row_num + 2);
        }
        items.push(item);
    }

    info!("Parsed {} items from CSV", items.len());
    Ok(items)
}

/// Writes items as CSV with the fixed 11-column header. `photo_url`
/// resolves each stored key to its public URL.
pub fn write_items<F>(items: &[Item], photo_url: F) -> Result<String>
where
    F: Fn(&str) -> String,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for item in items {
        let url = item
            .primary_photo_key()
            .map(&photo_url)
            .unwrap_or_default();
        writer.write_record([
            item.name.as_str(),
            item.category.as_str(),
            item.subcategory.as_str(),
            item.brand.as_str(),
            item.model.as_str(),
            &item.quantity.to_string(),
            item.unit.as_str(),
            item.location.as_str(),
            item.condition.as_str(),
            item.notes.as_str(),
            &url,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Exported {} items to CSV", items.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reduces an exported public URL back to the object key, so an exported
/// snapshot can be re-imported. Values that don't look like public URLs
/// are kept verbatim.
fn strip_public_url(value: &str) -> &str {
    match value.find(PUBLIC_OBJECT_MARKER) {
        Some(position) => {
            let tail = &value[position + PUBLIC_OBJECT_MARKER.len()..];
            // Skip the bucket segment
            match tail.split_once('/') {
                Some((_, key)) => key,
                None => tail,
            }
        }
        None => value,
    }
}

#[cfg(test)]
#[path = "csv_io_tests.rs"]
mod tests;
