//! Overlay canvas building PDF content operators

use crate::font::FontData;
use crate::image::{generate_image_operators, ImageXObject};
use crate::{PdfError, Result};
use lopdf::{dictionary, Document, Object, Stream};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A single-page overlay under construction
///
/// Drawing calls append content operators to an internal buffer in PDF
/// coordinates (origin at the bottom-left of the page, units in points).
/// The finished canvas can be serialized as a standalone PDF with
/// [`Canvas::write_pdf`], or stamped onto an existing template page via
/// [`crate::TemplateDocument::stamp`].
pub struct Canvas {
    /// Page width in points
    page_width: f64,
    /// Page height in points
    page_height: f64,
    /// Accumulated content operators
    ops: Vec<u8>,
    /// Embedded images: (resource name, hash, xobject)
    images: Vec<(String, u64, ImageXObject)>,
    /// Whether any text was drawn (font resource needed)
    font_used: bool,
}

impl Canvas {
    /// Create an empty canvas for a page of the given size in points
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            ops: Vec::new(),
            images: Vec::new(),
            font_used: false,
        }
    }

    /// Page size in points
    pub fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    /// Fill a rectangle with a solid color
    ///
    /// `x`, `y` is the lower-left corner in points.
    pub fn fill_rect(&mut self, color: Color, x: f64, y: f64, width: f64, height: f64) {
        let ops = format!(
            "q\n{} {} {} rg\n{x} {y} {width} {height} re\nf\nQ\n",
            color.r, color.g, color.b
        );
        self.ops.extend_from_slice(ops.as_bytes());
    }

    /// Draw a line of black text at a baseline position
    ///
    /// Characters are recorded against the font for embedding. When
    /// `rotate_180` is set, the glyphs are rotated half a turn about the
    /// baseline anchor so the text reads upside down.
    pub fn draw_text(
        &mut self,
        font: &mut FontData,
        text: &str,
        x: f64,
        y: f64,
        font_size: f32,
        rotate_180: bool,
    ) {
        if text.is_empty() {
            return;
        }

        font.add_chars(text);
        let text_hex = font.encode_text_hex(text);
        self.font_used = true;

        let mut ops = String::new();
        ops.push_str("BT\n");
        ops.push_str("0 0 0 rg\n");
        ops.push_str(&format!("/F1 {font_size} Tf\n"));
        if rotate_180 {
            // Tm = rotate 180° about the anchor point
            ops.push_str(&format!("-1 0 0 -1 {x} {y} Tm\n"));
        } else {
            ops.push_str(&format!("{x} {y} Td\n"));
        }
        ops.push_str(&format!("{text_hex} Tj\n"));
        ops.push_str("ET\n");

        self.ops.extend_from_slice(ops.as_bytes());
    }

    /// Draw an image into a target rectangle
    ///
    /// `x`, `y` is the lower-left corner in points. Identical image data is
    /// embedded once and reuses the same XObject resource.
    pub fn draw_image(
        &mut self,
        xobject: ImageXObject,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotate_180: bool,
    ) {
        let mut hasher = DefaultHasher::new();
        xobject.data.hash(&mut hasher);
        let hash = hasher.finish();

        let name = match self.images.iter().find(|(_, h, _)| *h == hash) {
            Some((name, _, _)) => name.clone(),
            None => {
                let name = format!("Im{}", self.images.len() + 1);
                self.images.push((name.clone(), hash, xobject));
                name
            }
        };

        let ops = generate_image_operators(&name, x, y, width, height, rotate_180);
        self.ops.extend_from_slice(&ops);
    }

    /// Accumulated content operators
    pub fn operators(&self) -> &[u8] {
        &self.ops
    }

    /// Embedded images as (resource name, xobject) pairs
    pub fn images(&self) -> impl Iterator<Item = (&str, &ImageXObject)> {
        self.images.iter().map(|(name, _, xo)| (name.as_str(), xo))
    }

    /// Whether any text was drawn on this canvas
    pub fn font_used(&self) -> bool {
        self.font_used
    }

    /// Serialize the canvas as a standalone single-page PDF
    ///
    /// The page carries only the overlay content. The same font passed to
    /// the drawing calls must be supplied so its glyphs can be embedded.
    pub fn write_pdf<P: AsRef<Path>>(&self, font: &FontData, path: P) -> Result<()> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            self.ops.clone(),
        ));

        let mut resources = lopdf::Dictionary::new();
        if self.font_used {
            let font_id = font.embed_into(&mut doc)?;
            let mut font_dict = lopdf::Dictionary::new();
            font_dict.set("F1", Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !self.images.is_empty() {
            let mut xobject_dict = lopdf::Dictionary::new();
            for (name, _, xo) in &self.images {
                let image_id = doc.add_object(xo.to_pdf_stream());
                xobject_dict.set(name.as_bytes(), Object::Reference(image_id));
            }
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_width as f32),
                Object::Real(self.page_height as f32),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc.save(path.as_ref())
            .map_err(|e| PdfError::SaveError(format!("{}: {e}", path.as_ref().display())))?;

        Ok(())
    }
}
