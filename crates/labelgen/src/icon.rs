//! Origin-country icon store

use crate::normalize::normalize_country;
use crate::row::LabelRow;
use crate::Result;
use std::path::{Path, PathBuf};

/// Lookup of origin icon art by country code
///
/// Icons live in a flat directory as `icon_<CODE>.png`. A missing icon
/// is not an error; the renderer falls back to a "MADE IN <CODE>" text
/// mark.
#[derive(Debug, Clone)]
pub struct IconStore {
    dir: PathBuf,
}

impl IconStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path an icon for this origin code would live at
    pub fn icon_path(&self, origin_country: &str) -> PathBuf {
        let code = normalize_country(origin_country);
        self.dir.join(format!("icon_{code}.png"))
    }

    /// Load icon bytes for an origin code, `None` when no art exists
    pub fn load(&self, origin_country: &str) -> Result<Option<Vec<u8>>> {
        let path = self.icon_path(origin_country);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(path)?))
    }

    /// Origin codes in the input that have no icon art
    ///
    /// Advisory pre-flight only; rendering proceeds with the text
    /// fallback for these codes.
    pub fn missing_codes(&self, rows: &[LabelRow]) -> Vec<String> {
        let mut codes: Vec<String> = rows
            .iter()
            .map(|row| normalize_country(&row.origin_country))
            .filter(|code| !code.is_empty() && !self.icon_path(code).is_file())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}
