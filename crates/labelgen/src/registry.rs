//! Coordinate registry: per-brand and per-template layout lookup

use crate::layout::Layout;
use crate::normalize::normalize;
use crate::{LabelError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// On-disk registry document
///
/// Top-level keys other than `defaults` and `templates` (e.g. `meta`,
/// `template_files` written by the authoring tooling) are ignored.
#[derive(Debug, Deserialize)]
struct RegistryDoc {
    #[serde(default)]
    defaults: BTreeMap<String, Layout>,
    #[serde(default)]
    templates: BTreeMap<String, BTreeMap<String, Layout>>,
}

/// Loaded coordinate registry
///
/// Brand and template keys are normalized on load, so lookups are
/// case- and whitespace-insensitive. Loaded once per run and read-only
/// thereafter.
#[derive(Debug)]
pub struct CoordRegistry {
    /// brand → default layout
    defaults: BTreeMap<String, Layout>,
    /// (brand, template key) → template-specific layout
    templates: BTreeMap<(String, String), Layout>,
}

impl CoordRegistry {
    /// Load and validate a registry JSON file
    ///
    /// Unknown text/icon keys inside any layout are a load-time error;
    /// the field vocabulary is closed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| LabelError::Config(format!("cannot read {}: {e}", path.display())))?;

        let doc: RegistryDoc = serde_json::from_str(&data)
            .map_err(|e| LabelError::Config(format!("invalid registry {}: {e}", path.display())))?;

        Ok(Self::from_doc(doc))
    }

    /// Parse a registry from a JSON string
    pub fn from_json(data: &str) -> Result<Self> {
        let doc: RegistryDoc = serde_json::from_str(data)
            .map_err(|e| LabelError::Config(format!("invalid registry: {e}")))?;
        Ok(Self::from_doc(doc))
    }

    fn from_doc(doc: RegistryDoc) -> Self {
        let defaults = doc
            .defaults
            .into_iter()
            .map(|(brand, layout)| (normalize(&brand), layout))
            .collect();

        let mut templates = BTreeMap::new();
        for (brand, entries) in doc.templates {
            let brand = normalize(&brand);
            for (key, layout) in entries {
                templates.insert((brand.clone(), normalize(&key)), layout);
            }
        }

        Self {
            defaults,
            templates,
        }
    }

    /// Resolve the layout for a template file
    ///
    /// The lookup key is the normalized filename stem. Falls back to the
    /// brand default when no template-specific entry exists.
    pub fn resolve(&self, brand: &str, template_path: &Path) -> Result<&Layout> {
        let stem = template_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.resolve_key(brand, &stem)
    }

    /// Resolve the layout for a brand and template key
    pub fn resolve_key(&self, brand: &str, template_key: &str) -> Result<&Layout> {
        let brand_norm = normalize(brand);
        let key_norm = normalize(template_key);

        if let Some(layout) = self.templates.get(&(brand_norm.clone(), key_norm.clone())) {
            debug!(brand = %brand_norm, key = %key_norm, "resolved template-specific layout");
            return Ok(layout);
        }

        if let Some(layout) = self.defaults.get(&brand_norm) {
            debug!(brand = %brand_norm, key = %key_norm, "resolved brand-default layout");
            return Ok(layout);
        }

        Err(LabelError::LayoutNotFound {
            brand: brand.to_string(),
            template_key: template_key.to_string(),
        })
    }
}
