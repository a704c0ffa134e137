//! Overlay rendering: the four fixed draw passes

use crate::layout::{FieldKey, IconKey, Layout};
use crate::normalize::normalize_country;
use crate::row::LabelRow;
use crate::Result;
use pdf_canvas::{Canvas, Color, FontData, ImageXObject};
use tracing::trace;

/// Font size of the "MADE IN <CODE>" fallback mark
const ORIGIN_FALLBACK_SIZE: f32 = 10.0;

/// Render a row's overlay onto a canvas
///
/// Four passes in fixed order:
/// 1. cover: opaque white boxes blanking pre-printed template areas;
/// 2. primary text: the SKU at `font_main_size` for each placed
///    `*_item_code` key;
/// 3. secondary text: localized names at `font_sub_size`;
/// 4. origin: the country icon scaled into each placed `icon_pos`
///    rect, or a "MADE IN <CODE>" text mark just above the rect when
///    no icon art exists.
///
/// A zero point/rect is "not placed" and never drawn, regardless of
/// hide/rotate flags; a hide flag suppresses an otherwise placed entry.
pub fn draw_overlay(
    canvas: &mut Canvas,
    font: &mut FontData,
    layout: &Layout,
    row: &LabelRow,
    icon: Option<&[u8]>,
) -> Result<()> {
    // 1) cover boxes
    for rect in &layout.cover_rects {
        if rect.is_zero() {
            continue;
        }
        canvas.fill_rect(Color::white(), rect.x(), rect.y(), rect.w(), rect.h());
    }

    // 2) SKU
    for key in FieldKey::PRIMARY {
        draw_field(canvas, font, layout, row, key, layout.font_main_size);
    }

    // 3) product names
    for key in FieldKey::SECONDARY {
        draw_field(canvas, font, layout, row, key, layout.font_sub_size);
    }

    // 4) origin marker
    let code = normalize_country(&row.origin_country);
    match icon {
        Some(bytes) => {
            let xobject = ImageXObject::from_bytes(bytes)?;
            for key in IconKey::ALL {
                let rect = match layout.icon_pos.get(&key) {
                    Some(rect) => rect,
                    None => continue,
                };
                if layout.is_icon_hidden(key) || rect.is_zero() {
                    continue;
                }
                canvas.draw_image(
                    xobject.clone(),
                    rect.x(),
                    rect.y(),
                    rect.w(),
                    rect.h(),
                    layout.is_icon_rotated(key),
                );
            }
        }
        None => {
            let msg = format!("MADE IN {code}");
            for key in IconKey::ALL {
                let rect = match layout.icon_pos.get(&key) {
                    Some(rect) => rect,
                    None => continue,
                };
                if layout.is_icon_hidden(key) || rect.is_zero() {
                    continue;
                }
                canvas.draw_text(
                    font,
                    &msg,
                    rect.x(),
                    rect.y() + rect.h() + 2.0,
                    ORIGIN_FALLBACK_SIZE,
                    layout.is_icon_rotated(key),
                );
            }
        }
    }

    Ok(())
}

fn draw_field(
    canvas: &mut Canvas,
    font: &mut FontData,
    layout: &Layout,
    row: &LabelRow,
    key: FieldKey,
    font_size: f32,
) {
    let point = match layout.pos.get(&key) {
        Some(point) => point,
        None => return,
    };
    if layout.is_hidden(key) || point.is_zero() {
        return;
    }

    let value = row.field_value(key);
    trace!(%key, value, x = point.x(), y = point.y(), "draw field");
    canvas.draw_text(
        font,
        value,
        point.x(),
        point.y(),
        font_size,
        layout.is_rotated(key),
    );
}
