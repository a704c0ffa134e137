//! Template PDF document handling

use crate::canvas::Canvas;
use crate::font::FontData;
use crate::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// A brand template PDF opened for overlay stamping
///
/// Wraps a parsed lopdf document. Overlay content is stamped onto the first
/// page; templates may carry extra pages (print marks, alternate sizes)
/// which are dropped on save.
#[derive(Debug)]
pub struct TemplateDocument {
    inner: Document,
}

impl TemplateDocument {
    /// Open a template PDF from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path.as_ref())
            .map_err(|e| PdfError::OpenError(format!("{}: {e}", path.as_ref().display())))?;
        Ok(Self { inner })
    }

    /// Open a template PDF from memory
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data)
            .map_err(|e| PdfError::OpenError(format!("from bytes: {e}")))?;
        Ok(Self { inner })
    }

    /// Number of pages in the template
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Size of the first page in points (width, height)
    ///
    /// Follows the MediaBox inheritance chain through parent page-tree
    /// nodes; falls back to A4 when the chain carries no MediaBox.
    pub fn page_size(&self) -> Result<(f64, f64)> {
        let page_id = self.first_page_id()?;
        let media_box = self.get_inherited_media_box(page_id)?;

        if media_box.len() < 4 {
            return Err(PdfError::ParseError("Invalid MediaBox format".to_string()));
        }

        let coord = |obj: &Object| -> Result<f64> {
            obj.as_f32()
                .map(|v| v as f64)
                .or_else(|_| obj.as_i64().map(|v| v as f64))
                .map_err(|_| PdfError::ParseError("Invalid MediaBox coordinate".to_string()))
        };

        let x1 = coord(&media_box[0])?;
        let y1 = coord(&media_box[1])?;
        let x2 = coord(&media_box[2])?;
        let y2 = coord(&media_box[3])?;

        Ok((x2 - x1, y2 - y1))
    }

    /// Stamp an overlay canvas onto the first page
    ///
    /// Appends the canvas operators (wrapped in q/Q to isolate graphics
    /// state) to the page's content stream and registers the canvas font
    /// and images in the page's Resources dictionary. Call after all
    /// drawing is done so the embedded font covers every used character.
    pub fn stamp(&mut self, canvas: &Canvas, font: &FontData) -> Result<()> {
        let page_id = self.first_page_id()?;

        let mut content = Vec::with_capacity(canvas.operators().len() + 4);
        content.extend_from_slice(b"q\n");
        content.extend_from_slice(canvas.operators());
        content.extend_from_slice(b"Q\n");
        self.append_to_content_stream(page_id, &content)?;

        if canvas.font_used() {
            let font_id = font.embed_into(&mut self.inner)?;
            self.add_page_resource(page_id, b"Font", "F1", font_id)?;
        }

        for (name, xobject) in canvas.images() {
            let image_id = self.inner.add_object(xobject.to_pdf_stream());
            self.add_page_resource(page_id, b"XObject", name, image_id)?;
        }

        Ok(())
    }

    /// Save the document, keeping only the first page
    pub fn save_first_page<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.keep_first_page_only()?;
        self.inner
            .save(path.as_ref())
            .map_err(|e| PdfError::SaveError(format!("{}: {e}", path.as_ref().display())))?;
        Ok(())
    }

    /// Serialize the document (first page only) to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.keep_first_page_only()?;
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(format!("to bytes: {e}")))?;
        Ok(buffer)
    }

    fn first_page_id(&self) -> Result<ObjectId> {
        self.inner
            .get_pages()
            .get(&1)
            .copied()
            .ok_or_else(|| PdfError::ParseError("Template has no pages".to_string()))
    }

    /// Rewire the root page tree to contain only the first page
    fn keep_first_page_only(&mut self) -> Result<()> {
        let page_id = self.first_page_id()?;

        let catalog_id = match self.inner.trailer.get(b"Root") {
            Ok(Object::Reference(id)) => *id,
            _ => return Err(PdfError::ParseError("Missing document catalog".to_string())),
        };
        let catalog = self.inner.get_object(catalog_id)?.as_dict()?;
        let pages_root_id = match catalog.get(b"Pages") {
            Ok(Object::Reference(id)) => *id,
            _ => return Err(PdfError::ParseError("Missing page tree root".to_string())),
        };

        // MediaBox may be inherited from a pruned intermediate node, so pin
        // it onto the page itself before rewiring
        let media_box = self.get_inherited_media_box(page_id)?;
        let mut page_dict = self.inner.get_object(page_id)?.as_dict()?.clone();
        page_dict.set(b"MediaBox", Object::Array(media_box));
        page_dict.set(b"Parent", Object::Reference(pages_root_id));
        self.inner.objects.insert(page_id, page_dict.into());

        let mut pages_dict = self.inner.get_object(pages_root_id)?.as_dict()?.clone();
        pages_dict.set(b"Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages_dict.set(b"Count", 1);
        pages_dict.remove(b"MediaBox");
        self.inner
            .objects
            .insert(pages_root_id, pages_dict.into());

        self.inner.prune_objects();
        Ok(())
    }

    /// Get MediaBox, following parent inheritance chain if needed
    fn get_inherited_media_box(&self, page_id: ObjectId) -> Result<Vec<Object>> {
        let mut current_id = page_id;

        // Follow parent chain up to 10 levels (safety limit)
        for _ in 0..10 {
            let dict = self
                .inner
                .get_object(current_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(media_box) = dict.get(b"MediaBox").or_else(|_| dict.get(b"CropBox")) {
                let media_box_array = match media_box {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => self
                        .inner
                        .get_object(*ref_id)?
                        .as_array()
                        .map_err(|_| {
                            PdfError::ParseError("MediaBox reference is not an array".to_string())
                        })?
                        .clone(),
                    _ => {
                        return Err(PdfError::ParseError("MediaBox is not an array".to_string()))
                    }
                };
                return Ok(media_box_array);
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        // Fallback: assume A4 page size
        Ok(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.28),
            Object::Real(841.89),
        ])
    }

    /// Append content to a page's content stream
    ///
    /// Handles Contents as a direct stream, a reference, or an array of
    /// streams; compressed streams are decompressed before appending.
    fn append_to_content_stream(&mut self, page_id: ObjectId, content: &[u8]) -> Result<()> {
        let (existing_content, page_dict_clone) = {
            let page_dict = self
                .inner
                .get_object(page_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let page_dict_clone = page_dict.clone();

            let existing_content = match page_dict.get(b"Contents") {
                Ok(Object::Stream(stream)) => stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone()),
                Ok(Object::Reference(ref_id)) => {
                    if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                        stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone())
                    } else {
                        Vec::new()
                    }
                }
                Ok(Object::Array(arr)) => {
                    let mut combined = Vec::new();
                    for obj in arr {
                        let stream = match obj {
                            Object::Reference(ref_id) => {
                                match self.inner.get_object(*ref_id) {
                                    Ok(Object::Stream(stream)) => Some(stream),
                                    _ => None,
                                }
                            }
                            Object::Stream(stream) => Some(stream),
                            _ => None,
                        };
                        if let Some(stream) = stream {
                            let data = stream
                                .decompressed_content()
                                .unwrap_or_else(|_| stream.content.clone());
                            combined.extend_from_slice(&data);
                            // Operators from adjacent streams must stay separated
                            combined.push(b'\n');
                        }
                    }
                    combined
                }
                _ => Vec::new(),
            };

            (existing_content, page_dict_clone)
        };

        let mut new_content = existing_content;
        new_content.extend_from_slice(content);

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Add an entry to a sub-dictionary of the page's Resources
    ///
    /// `category` is the Resources key ("Font" or "XObject"). Resolves an
    /// indirect Resources dictionary and rewrites it inline on the page.
    fn add_page_resource(
        &mut self,
        page_id: ObjectId,
        category: &[u8],
        name: &str,
        object_id: ObjectId,
    ) -> Result<()> {
        let page_dict = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?
            .clone();

        let mut resources = match page_dict.get(b"Resources") {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            Ok(Object::Reference(ref_id)) => self
                .inner
                .get_object(*ref_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Resources is not a dictionary".to_string()))?
                .clone(),
            _ => Dictionary::new(),
        };

        let mut sub_dict = match resources.get(category) {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            Ok(Object::Reference(ref_id)) => self
                .inner
                .get_object(*ref_id)?
                .as_dict()
                .map(|d| d.clone())
                .unwrap_or_default(),
            _ => Dictionary::new(),
        };
        sub_dict.set(name.as_bytes(), Object::Reference(object_id));
        resources.set(category, Object::Dictionary(sub_dict));

        let mut new_page_dict = page_dict;
        new_page_dict.set(b"Resources", Object::Dictionary(resources));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Access the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}
