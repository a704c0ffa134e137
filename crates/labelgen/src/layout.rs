//! Layout schema for the coordinate registry

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A draw anchor `[x, y]` in PDF page points (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    /// A `[0, 0]` point means "not placed" and suppresses drawing
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0 && self.1 == 0.0
    }
}

/// A rectangle `[x, y, w, h]` in PDF page points (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect(pub f64, pub f64, pub f64, pub f64);

impl Rect {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn w(&self) -> f64 {
        self.2
    }

    pub fn h(&self) -> f64 {
        self.3
    }

    /// An all-zero rectangle means "not placed" and suppresses drawing
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0 && self.1 == 0.0 && self.2 == 0.0 && self.3 == 0.0
    }
}

/// Text field keys: panel (L, L1..L3, R) crossed with the drawn value
///
/// The vocabulary is closed. A layout using any other key fails to
/// deserialize, catching typos in authored registries at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "L_item_code")]
    LItemCode,
    #[serde(rename = "L1_item_code")]
    L1ItemCode,
    #[serde(rename = "L2_item_code")]
    L2ItemCode,
    #[serde(rename = "L3_item_code")]
    L3ItemCode,
    #[serde(rename = "R_item_code")]
    RItemCode,
    #[serde(rename = "L_name_ko")]
    LNameKo,
    #[serde(rename = "L_name_en")]
    LNameEn,
    #[serde(rename = "R_name_ko")]
    RNameKo,
    #[serde(rename = "R_name_en")]
    RNameEn,
    #[serde(rename = "L1_name_ko")]
    L1NameKo,
    #[serde(rename = "L1_name_en")]
    L1NameEn,
    #[serde(rename = "L2_name_ko")]
    L2NameKo,
    #[serde(rename = "L2_name_en")]
    L2NameEn,
    #[serde(rename = "L3_name_ko")]
    L3NameKo,
    #[serde(rename = "L3_name_en")]
    L3NameEn,
}

impl FieldKey {
    /// SKU fields, drawn at `font_main_size`, in pass order
    pub const PRIMARY: [FieldKey; 5] = [
        FieldKey::LItemCode,
        FieldKey::L1ItemCode,
        FieldKey::L2ItemCode,
        FieldKey::L3ItemCode,
        FieldKey::RItemCode,
    ];

    /// Name fields, drawn at `font_sub_size`, in pass order
    pub const SECONDARY: [FieldKey; 10] = [
        FieldKey::LNameKo,
        FieldKey::LNameEn,
        FieldKey::RNameKo,
        FieldKey::RNameEn,
        FieldKey::L1NameKo,
        FieldKey::L1NameEn,
        FieldKey::L2NameKo,
        FieldKey::L2NameEn,
        FieldKey::L3NameKo,
        FieldKey::L3NameEn,
    ];
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKey::LItemCode => "L_item_code",
            FieldKey::L1ItemCode => "L1_item_code",
            FieldKey::L2ItemCode => "L2_item_code",
            FieldKey::L3ItemCode => "L3_item_code",
            FieldKey::RItemCode => "R_item_code",
            FieldKey::LNameKo => "L_name_ko",
            FieldKey::LNameEn => "L_name_en",
            FieldKey::RNameKo => "R_name_ko",
            FieldKey::RNameEn => "R_name_en",
            FieldKey::L1NameKo => "L1_name_ko",
            FieldKey::L1NameEn => "L1_name_en",
            FieldKey::L2NameKo => "L2_name_ko",
            FieldKey::L2NameEn => "L2_name_en",
            FieldKey::L3NameKo => "L3_name_ko",
            FieldKey::L3NameEn => "L3_name_en",
        };
        f.write_str(name)
    }
}

/// Origin icon placement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum IconKey {
    #[serde(rename = "L_origin")]
    LOrigin,
    #[serde(rename = "R_origin")]
    ROrigin,
    #[serde(rename = "origin")]
    Origin,
}

impl IconKey {
    /// All icon keys, in pass order
    pub const ALL: [IconKey; 3] = [IconKey::LOrigin, IconKey::ROrigin, IconKey::Origin];
}

/// A resolved draw layout for one template (or a brand default)
///
/// All coordinates are in the PDF page space of the template the layout
/// applies to. Coordinate values are trusted as authored.
#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    /// Opaque boxes painted first to blank pre-printed template areas
    #[serde(default)]
    pub cover_rects: Vec<Rect>,

    /// Text field anchors
    #[serde(default)]
    pub pos: BTreeMap<FieldKey, Point>,

    /// Origin icon target rectangles
    #[serde(default)]
    pub icon_pos: BTreeMap<IconKey, Rect>,

    /// Per-field 180° rotation flags (mirrored right-hand panels)
    #[serde(default)]
    pub rotate_180: BTreeMap<FieldKey, bool>,

    /// Per-icon 180° rotation flags
    #[serde(default)]
    pub icon_rotate_180: BTreeMap<IconKey, bool>,

    /// Per-field hide flags
    #[serde(default)]
    pub hide: BTreeMap<FieldKey, bool>,

    /// Per-icon hide flags
    #[serde(default)]
    pub icon_hide: BTreeMap<IconKey, bool>,

    /// SKU font size in points
    #[serde(default = "default_font_main_size")]
    pub font_main_size: f32,

    /// Product name font size in points
    #[serde(default = "default_font_sub_size")]
    pub font_sub_size: f32,
}

fn default_font_main_size() -> f32 {
    26.0
}

fn default_font_sub_size() -> f32 {
    12.0
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cover_rects: Vec::new(),
            pos: BTreeMap::new(),
            icon_pos: BTreeMap::new(),
            rotate_180: BTreeMap::new(),
            icon_rotate_180: BTreeMap::new(),
            hide: BTreeMap::new(),
            icon_hide: BTreeMap::new(),
            font_main_size: default_font_main_size(),
            font_sub_size: default_font_sub_size(),
        }
    }
}

impl Layout {
    /// Whether a text field is flagged hidden
    pub fn is_hidden(&self, key: FieldKey) -> bool {
        self.hide.get(&key).copied().unwrap_or(false)
    }

    /// Whether a text field is flagged for 180° rotation
    pub fn is_rotated(&self, key: FieldKey) -> bool {
        self.rotate_180.get(&key).copied().unwrap_or(false)
    }

    /// Whether an icon placement is flagged hidden
    pub fn is_icon_hidden(&self, key: IconKey) -> bool {
        self.icon_hide.get(&key).copied().unwrap_or(false)
    }

    /// Whether an icon placement is flagged for 180° rotation
    pub fn is_icon_rotated(&self, key: IconKey) -> bool {
        self.icon_rotate_180.get(&key).copied().unwrap_or(false)
    }
}
