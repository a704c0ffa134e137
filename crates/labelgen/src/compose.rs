//! Document composition: one-row render and batch runs

use crate::icon::IconStore;
use crate::overlay::draw_overlay;
use crate::registry::CoordRegistry;
use crate::row::LabelRow;
use crate::template::find_template;
use crate::{LabelError, Result};
use pdf_canvas::{Canvas, FontData, TemplateDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders rows into final label PDFs
///
/// Owns the loaded registry, the typeface and the store locations.
/// Single-threaded: one row runs to completion before the next begins,
/// and nothing is cached across rows except the registry and font.
pub struct Composer {
    registry: CoordRegistry,
    font: FontData,
    template_root: PathBuf,
    icons: IconStore,
    out_dir: PathBuf,
}

impl Composer {
    pub fn new(
        registry: CoordRegistry,
        font: FontData,
        template_root: impl AsRef<Path>,
        icon_dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;

        Ok(Self {
            registry,
            font,
            template_root: template_root.as_ref().to_path_buf(),
            icons: IconStore::new(icon_dir),
            out_dir,
        })
    }

    /// Load the registry and typeface from disk and build a composer
    pub fn from_paths(
        coords_path: impl AsRef<Path>,
        font_path: impl AsRef<Path>,
        template_root: impl AsRef<Path>,
        icon_dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let registry = CoordRegistry::load(coords_path)?;

        let font_path = font_path.as_ref();
        let ttf_data = std::fs::read(font_path)
            .map_err(|e| LabelError::Asset(format!("cannot read typeface {}: {e}", font_path.display())))?;
        let name = font_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "typeface".to_string());
        let font = FontData::from_ttf(&name, &ttf_data)
            .map_err(|e| LabelError::Asset(format!("invalid typeface {}: {e}", font_path.display())))?;

        Self::new(registry, font, template_root, icon_dir, out_dir)
    }

    /// Icon store used by this composer (for advisory pre-flight checks)
    pub fn icons(&self) -> &IconStore {
        &self.icons
    }

    /// Render one row to its output PDF, returning the written path
    ///
    /// The overlay is also written as a transient standalone PDF
    /// (`__overlay_<item_code>.pdf`) beside the output, and removed
    /// best-effort once composition finishes; a failed removal never
    /// fails the render.
    pub fn render_row(&mut self, row: &LabelRow) -> Result<PathBuf> {
        // Spreadsheet cells often carry edge whitespace; lookups and the
        // output name use the trimmed values
        let brand = row.brand.trim();
        let box_type = row.box_type.trim();
        let box_group = row.box_group.trim();

        let template_path = find_template(&self.template_root, brand, box_type, box_group)?;
        let layout = self.registry.resolve(brand, &template_path)?;

        let mut template = TemplateDocument::open(&template_path)?;
        let (width, height) = template.page_size()?;
        debug!(
            template = %template_path.display(),
            width, height, item_code = %row.item_code, "rendering label"
        );

        let mut canvas = Canvas::new(width, height);
        let icon = self.icons.load(&row.origin_country)?;
        draw_overlay(&mut canvas, &mut self.font, layout, row, icon.as_deref())?;

        let overlay_path = self
            .out_dir
            .join(format!("__overlay_{}.pdf", row.item_code));
        let output_path = self.out_dir.join(row.output_filename());

        let result = (|| -> Result<PathBuf> {
            canvas.write_pdf(&self.font, &overlay_path)?;
            template.stamp(&canvas, &self.font)?;
            template.save_first_page(&output_path)?;
            Ok(output_path)
        })();

        // Transient artifact cleanup never affects the outcome
        let _ = std::fs::remove_file(&overlay_path);

        let output_path = result?;
        info!(output = %output_path.display(), "label written");
        Ok(output_path)
    }

    /// Render rows in source order
    ///
    /// Stops once `limit` outputs are produced (`0` = unbounded). The
    /// first row error aborts the whole batch; rows are never skipped.
    pub fn render_batch(&mut self, rows: &[LabelRow], limit: usize) -> Result<Vec<PathBuf>> {
        let mut outputs = Vec::new();

        for row in rows {
            let path = self.render_row(row)?;
            outputs.push(path);
            if limit > 0 && outputs.len() >= limit {
                break;
            }
        }

        info!(count = outputs.len(), "batch complete");
        Ok(outputs)
    }
}
