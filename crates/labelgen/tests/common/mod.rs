//! Shared fixtures for integration tests

use lopdf::{dictionary, Document, Object, Stream};

/// Minimal TrueType font with head, hhea, maxp and hmtx tables
///
/// No cmap table, so every character maps to glyph 0.
pub fn minimal_ttf() -> Vec<u8> {
    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = Vec::new();

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

    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x00005000u32.to_be_bytes()); // version 0.5
    maxp.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    tables.push((b"maxp", maxp));

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

/// Minimal single-page template PDF with the given page size
pub fn template_pdf(width: f32, height: f32) -> Vec<u8> {
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

/// Small opaque PNG usable as origin icon art
pub fn icon_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([200, 30, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}
