//! Qualitative palettes and per-device color assignment.

use crate::types::{Rgb, Rgba};
use viewstat_common::Result;
use viewstat_config::PaletteConfig;

/// ColorBrewer "Set3".
pub const SET3: [Rgb; 12] = [
    Rgb(0x8d, 0xd3, 0xc7),
    Rgb(0xff, 0xff, 0xb3),
    Rgb(0xbe, 0xba, 0xda),
    Rgb(0xfb, 0x80, 0x72),
    Rgb(0x80, 0xb1, 0xd3),
    Rgb(0xfd, 0xb4, 0x62),
    Rgb(0xb3, 0xde, 0x69),
    Rgb(0xfc, 0xcd, 0xe5),
    Rgb(0xd9, 0xd9, 0xd9),
    Rgb(0xbc, 0x80, 0xbd),
    Rgb(0xcc, 0xeb, 0xc5),
    Rgb(0xff, 0xed, 0x6f),
];

pub const TABLEAU: [Rgb; 10] = [
    Rgb(31, 119, 180),  // Blue
    Rgb(255, 127, 14),  // Orange
    Rgb(44, 160, 44),   // Green
    Rgb(214, 39, 40),   // Red
    Rgb(148, 103, 189), // Purple
    Rgb(140, 86, 75),   // Brown
    Rgb(227, 119, 194), // Pink
    Rgb(127, 127, 127), // Gray
    Rgb(188, 189, 34),  // Olive
    Rgb(23, 190, 207),  // Cyan
];

pub const VIBRANT: [Rgb; 8] = [
    Rgb(230, 25, 75),   // Red
    Rgb(60, 180, 75),   // Green
    Rgb(255, 225, 25),  // Yellow
    Rgb(0, 130, 200),   // Blue
    Rgb(245, 130, 48),  // Orange
    Rgb(145, 30, 180),  // Purple
    Rgb(70, 240, 240),  // Cyan
    Rgb(240, 50, 230),  // Magenta
];

/// A fixed, ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(SET3.to_vec())
    }
}

impl Palette {
    /// An empty list falls back to Set3.
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            return Self { colors: SET3.to_vec() };
        }
        Self { colors }
    }

    pub fn from_config(config: &PaletteConfig) -> Result<Self> {
        let colors = match config {
            PaletteConfig::Set3 => SET3.to_vec(),
            PaletteConfig::Tableau => TABLEAU.to_vec(),
            PaletteConfig::Vibrant => VIBRANT.to_vec(),
            PaletteConfig::Custom(hex) => hex
                .iter()
                .map(|c| Rgb::from_hex(c))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Self::new(colors))
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for item `i` of `n`: index `floor(i / n * len)`, clamped to the last entry.
    pub fn pick(&self, i: usize, n: usize) -> Rgb {
        let len = self.colors.len();
        let index = if n == 0 { 0 } else { (i * len / n).min(len - 1) };
        self.colors[index]
    }
}

/// Device label to RGBA color, in the order the labels were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceColorMap {
    entries: Vec<(String, Rgba)>,
}

impl DeviceColorMap {
    pub fn get(&self, device: &str) -> Option<Rgba> {
        self.entries
            .iter()
            .find(|(label, _)| label == device)
            .map(|&(_, color)| color)
    }

    /// Color for `device`, opaque black when it was never assigned.
    pub fn color_for(&self, device: &str) -> Rgba {
        self.get(device).unwrap_or(Rgba::opaque(Rgb::BLACK))
    }

    pub fn entries(&self) -> &[(String, Rgba)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spreads a palette evenly over a set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Colorizer {
    palette: Palette,
}

impl Colorizer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Label `i` of `n` gets the palette color at position `i / n`.
    ///
    /// Labels are expected to be distinct; with more labels than palette
    /// entries neighbouring labels share a color.
    pub fn assign<S: AsRef<str>>(&self, labels: &[S]) -> DeviceColorMap {
        let n = labels.len();
        let entries = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_ref().to_string(), Rgba::opaque(self.palette.pick(i, n))))
            .collect();
        DeviceColorMap { entries }
    }
}
