//! Template file resolution

use crate::normalize::normalize;
use crate::{LabelError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate the template PDF for a brand / box type / box group
///
/// Scans `<root>/<brand>` for `.pdf` files (extension matched
/// case-insensitively) whose normalized filename stem equals
/// `normalize(box_type + "_" + box_group)`. Two files normalizing to the
/// same key is an authoring error and is rejected rather than resolved
/// by directory order.
pub fn find_template(
    root: &Path,
    brand: &str,
    box_type: &str,
    box_group: &str,
) -> Result<PathBuf> {
    let brand_dir = root.join(brand);
    if !brand_dir.is_dir() {
        return Err(LabelError::BrandDirectoryNotFound(
            brand_dir.display().to_string(),
        ));
    }

    let target_key = normalize(&format!("{box_type}_{box_group}"));
    let mut found: Option<PathBuf> = None;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&brand_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for path in entries {
        let is_pdf = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            continue;
        }

        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => continue,
        };

        if normalize(&stem) == target_key {
            if let Some(first) = found {
                return Err(LabelError::DuplicateTemplateKey {
                    brand: brand.to_string(),
                    key: target_key,
                    first: first.display().to_string(),
                    second: path.display().to_string(),
                });
            }
            found = Some(path);
        }
    }

    match found {
        Some(path) => {
            debug!(template = %path.display(), "resolved template");
            Ok(path)
        }
        None => Err(LabelError::TemplateNotFound {
            brand: brand.to_string(),
            box_type: box_type.to_string(),
            box_group: box_group.to_string(),
        }),
    }
}
