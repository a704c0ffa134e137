//! Integration tests: overlay construction and template stamping

use lopdf::{dictionary, Document, Object, Stream};
use pdf_canvas::{Canvas, Color, FontData, ImageXObject, TemplateDocument};
use std::io::Cursor;

/// Minimal TrueType font with head, hhea and maxp tables
///
/// Enough for ttf-parser to accept it: no cmap, so every character maps
/// to glyph 0.
fn minimal_ttf() -> Vec<u8> {
    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = Vec::new();

    // head
    let mut head = Vec::new();
    head.extend_from_slice(&0x00010000u32.to_be_bytes()); // version
    head.extend_from_slice(&0u32.to_be_bytes()); // fontRevision
    head.extend_from_slice(&0u32.to_be_bytes()); // checkSumAdjustment
    head.extend_from_slice(&0x5F0F3CF5u32.to_be_bytes()); // magicNumber
    head.extend_from_slice(&0u16.to_be_bytes()); // flags
    head.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    head.extend_from_slice(&[0u8; 16]); // created + modified
    head.extend_from_slice(&0i16.to_be_bytes()); // xMin
    head.extend_from_slice(&(-200i16).to_be_bytes()); // yMin
    head.extend_from_slice(&1000i16.to_be_bytes()); // xMax
    head.extend_from_slice(&800i16.to_be_bytes()); // yMax
    head.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    head.extend_from_slice(&8u16.to_be_bytes()); // lowestRecPPEM
    head.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
    head.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat
    head.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
    tables.push((b"head", head));

    // hhea
    let mut hhea = Vec::new();
    hhea.extend_from_slice(&0x00010000u32.to_be_bytes()); // version
    hhea.extend_from_slice(&800i16.to_be_bytes()); // ascender
    hhea.extend_from_slice(&(-200i16).to_be_bytes()); // descender
    hhea.extend_from_slice(&0i16.to_be_bytes()); // lineGap
    hhea.extend_from_slice(&1000u16.to_be_bytes()); // advanceWidthMax
    hhea.extend_from_slice(&[0u8; 22]); // min side bearings, extents, reserved
    hhea.extend_from_slice(&0i16.to_be_bytes()); // metricDataFormat
    hhea.extend_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    tables.push((b"hhea", hhea));

    // maxp (version 0.5)
    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x00005000u32.to_be_bytes());
    maxp.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    tables.push((b"maxp", maxp));

    // hmtx (one long metric)
    let mut hmtx = Vec::new();
    hmtx.extend_from_slice(&500u16.to_be_bytes()); // advance
    hmtx.extend_from_slice(&0i16.to_be_bytes()); // left side bearing
    tables.push((b"hmtx", hmtx));

    let num_tables = tables.len() as u16;
    let mut font = Vec::new();
    font.extend_from_slice(&0x00010000u32.to_be_bytes()); // sfnt version
    font.extend_from_slice(&num_tables.to_be_bytes());
    font.extend_from_slice(&[0u8; 6]); // searchRange, entrySelector, rangeShift

    let mut offset = 12 + (num_tables as u32) * 16;
    let mut records = Vec::new();
    let mut data = Vec::new();
    for (tag, table) in &tables {
        records.extend_from_slice(*tag);
        records.extend_from_slice(&0u32.to_be_bytes()); // checksum (unchecked)
        records.extend_from_slice(&offset.to_be_bytes());
        records.extend_from_slice(&(table.len() as u32).to_be_bytes());
        let mut padded = table.clone();
        while padded.len() % 4 != 0 {
            padded.push(0);
        }
        offset += padded.len() as u32;
        data.extend_from_slice(&padded);
    }
    font.extend_from_slice(&records);
    font.extend_from_slice(&data);
    font
}

fn build_template(width: f32, height: f32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        b"0.9 0.9 0.9 rg\n0 0 100 100 re\nf\n".to_vec(),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "Contents" => Object::Reference(content_id),
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(width),
            Object::Real(height),
        ],
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

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn icon_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([200, 30, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn minimal_font_parses() {
    let font = FontData::from_ttf("test-font", &minimal_ttf()).unwrap();
    assert_eq!(font.units_per_em(), 1000);
    assert_eq!(font.ascender(), 800);
    assert_eq!(font.descender(), -200);
}

#[test]
fn overlay_written_as_standalone_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("__overlay_IL-001.pdf");

    let mut font = FontData::from_ttf("test-font", &minimal_ttf()).unwrap();
    let mut canvas = Canvas::new(595.0, 842.0);
    canvas.fill_rect(Color::white(), 180.0, 295.0, 160.0, 55.0);
    canvas.draw_text(&mut font, "IL-001", 180.0, 330.0, 26.0, false);
    canvas.draw_image(
        ImageXObject::from_bytes(&icon_png()).unwrap(),
        463.0,
        139.0,
        60.0,
        30.0,
        false,
    );

    canvas.write_pdf(&font, &path).unwrap();

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn stamped_template_keeps_base_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut font = FontData::from_ttf("test-font", &minimal_ttf()).unwrap();
    let mut template = TemplateDocument::open_from_bytes(&build_template(595.0, 842.0)).unwrap();
    let (w, h) = template.page_size().unwrap();
    assert_eq!((w, h), (595.0, 842.0));

    let mut canvas = Canvas::new(w, h);
    canvas.fill_rect(Color::white(), 50.0, 60.0, 70.0, 80.0);
    canvas.draw_text(&mut font, "SKU-42", 50.0, 100.0, 26.0, true);

    template.stamp(&canvas, &font).unwrap();
    template.save_first_page(&path).unwrap();

    let doc = Document::load(&path).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let page_id = *pages.get(&1).unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    let content_str = String::from_utf8_lossy(&content);

    assert!(content_str.contains("0 0 100 100 re"));
    assert!(content_str.contains("50 60 70 80 re"));
    assert!(content_str.contains("-1 0 0 -1 50 100 Tm"));
}

#[test]
fn stamped_image_registers_xobject() {
    let mut font = FontData::from_ttf("test-font", &minimal_ttf()).unwrap();
    let mut template = TemplateDocument::open_from_bytes(&build_template(420.0, 298.0)).unwrap();

    let mut canvas = Canvas::new(420.0, 298.0);
    canvas.draw_image(
        ImageXObject::from_bytes(&icon_png()).unwrap(),
        10.0,
        10.0,
        40.0,
        20.0,
        false,
    );
    canvas.draw_text(&mut font, "MADE IN KR", 10.0, 40.0, 10.0, false);
    template.stamp(&canvas, &font).unwrap();

    let bytes_doc = template.to_bytes().unwrap();
    let doc = Document::load_mem(&bytes_doc).unwrap();

    let image_count = doc
        .objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(s) => s
                .dict
                .get(b"Subtype")
                .ok()
                .and_then(|v| v.as_name().ok())
                .map(|n| n == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count();
    assert_eq!(image_count, 1);
}
