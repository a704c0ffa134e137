//! Item rows and CSV ingestion

use crate::layout::FieldKey;
use crate::{LabelError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Required input columns, in canonical order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "brand",
    "box_type",
    "box_group",
    "item_code",
    "product_name_ko",
    "product_name_en",
    "origin_country",
];

/// One item row of the input data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelRow {
    pub brand: String,
    pub box_type: String,
    pub box_group: String,
    pub item_code: String,
    pub product_name_ko: String,
    pub product_name_en: String,
    pub origin_country: String,
}

impl LabelRow {
    /// The row value a text field key draws
    pub fn field_value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::LItemCode
            | FieldKey::L1ItemCode
            | FieldKey::L2ItemCode
            | FieldKey::L3ItemCode
            | FieldKey::RItemCode => &self.item_code,
            FieldKey::LNameKo
            | FieldKey::L1NameKo
            | FieldKey::L2NameKo
            | FieldKey::L3NameKo
            | FieldKey::RNameKo => &self.product_name_ko,
            FieldKey::LNameEn
            | FieldKey::L1NameEn
            | FieldKey::L2NameEn
            | FieldKey::L3NameEn
            | FieldKey::RNameEn => &self.product_name_en,
        }
    }

    /// Output filename for this row's rendered label
    ///
    /// Edge whitespace in brand, box type and box group is trimmed; the
    /// item code is used as-is.
    pub fn output_filename(&self) -> String {
        format!(
            "{}_{}_{}_{}.pdf",
            self.brand.trim(),
            self.box_type.trim(),
            self.box_group.trim(),
            self.item_code
        )
    }
}

/// Read rows from a CSV file
///
/// The header must contain every required column (extra columns are
/// ignored); a missing column is a schema error raised before any row
/// is parsed.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<LabelRow>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_rows_from(file)
}

/// Read rows from any CSV reader
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<LabelRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(LabelError::Schema(missing.join(", ")));
    }

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: LabelRow = result?;
        rows.push(row);
    }
    Ok(rows)
}
