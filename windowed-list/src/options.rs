use crate::Overscan;

/// Configuration for [`crate::WindowedList`], read once at construction.
///
/// Defaults match a 500×150 list of 100px items with 15 initial items and one item of
/// overscan on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Viewport height in pixels.
    pub height: u32,
    /// Viewport width in pixels. Informational; the engine scrolls on the vertical axis only.
    pub width: u32,
    /// Fixed item size in pixels. Values below 1 are treated as 1.
    pub item_size: u32,
    /// Expected number of initial backing items.
    ///
    /// The registry is authoritative: if the host supplies a different number of children on
    /// attachment, the list uses the children it actually got.
    pub item_count: usize,
    pub overscan: Overscan,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            height: 500,
            width: 150,
            item_size: 100,
            item_count: 15,
            overscan: Overscan::default(),
        }
    }
}

impl ListOptions {
    pub fn new(height: u32, item_size: u32, item_count: usize) -> Self {
        Self {
            height,
            item_size: item_size.max(1),
            item_count,
            ..Self::default()
        }
    }

    /// Builds options from host attributes (`height`, `width`, `itemSize`, `itemCount`,
    /// `topCount`, `bottomCount`).
    ///
    /// Values are parsed leniently: leading whitespace is skipped and the longest integer
    /// prefix is used, so `"120px"` reads as 120. Unknown names are ignored; unparseable values
    /// keep the default.
    pub fn from_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut options = Self::default();
        for (name, value) in attributes {
            let Some(parsed) = parse_int_prefix(value) else {
                lwarn!(name, value, "ListOptions: ignoring unparseable attribute");
                continue;
            };
            match name {
                "height" => options.height = clamp_u32(parsed),
                "width" => options.width = clamp_u32(parsed),
                "itemSize" => options.item_size = clamp_u32(parsed).max(1),
                "itemCount" => options.item_count = parsed.max(0) as usize,
                "topCount" => options.overscan.top = clamp_u32(parsed),
                "bottomCount" => options.overscan.bottom = clamp_u32(parsed),
                _ => {
                    ltrace!(name, "ListOptions: unknown attribute");
                }
            }
        }
        options
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_item_size(mut self, item_size: u32) -> Self {
        self.item_size = item_size.max(1);
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_overscan(mut self, top: u32, bottom: u32) -> Self {
        self.overscan = Overscan::new(top, bottom);
        self
    }
}

fn clamp_u32(v: i64) -> u32 {
    v.clamp(0, u32::MAX as i64) as u32
}

pub(crate) fn parse_int_prefix(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let mut n: i64 = 0;
    for b in digits[..len].bytes() {
        n = n.saturating_mul(10).saturating_add((b - b'0') as i64);
    }
    Some(if negative { -n } else { n })
}

