//! Per-language presentation settings.
//!
//! Everything that differs between the Japanese and English figures lives in
//! a [`LanguageProfile`] value handed to the renderers; nothing is global.

use serde::{Deserialize, Serialize};
use shared::error::SemanticMapError;
use shared::types::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use ttf_parser::name_id;

pub const BACKGROUND_HEX: &str = "#0d1117";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Japanese,
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Sequential colour ramp sampled on `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    stops: Vec<Rgb>,
}

impl Palette {
    pub fn new(name: &str, stops: Vec<Rgb>) -> Self {
        Self {
            name: name.to_string(),
            stops,
        }
    }

    fn from_hex_stops(name: &str, stops: &[&str]) -> Self {
        Self::new(name, stops.iter().filter_map(|h| Rgb::from_hex(h)).collect())
    }

    pub fn blues() -> Self {
        Self::from_hex_stops(
            "Blues",
            &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
        )
    }

    pub fn oranges() -> Self {
        Self::from_hex_stops(
            "Oranges",
            &[
                "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801",
                "#a63603", "#7f2704",
            ],
        )
    }

    pub fn sample(&self, t: f64) -> Rgb {
        match self.stops.len() {
            0 => Rgb(255, 255, 255),
            1 => self.stops[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let lo = pos.floor() as usize;
                let hi = (lo + 1).min(n - 1);
                self.stops[lo].lerp(self.stops[hi], pos - lo as f64)
            }
        }
    }

    /// `count` colours evenly spaced between `start` and `end` inclusive.
    pub fn linspace(&self, start: f64, end: f64, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(start)],
            _ => (0..count)
                .map(|i| self.sample(start + (end - start) * i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FontSelection {
    /// A font file that must exist when rendering.
    File(PathBuf),
    /// A family name resolved by whatever displays the figure.
    Family(String),
}

impl FontSelection {
    /// Family name to put in rendered text. For a font file this is the
    /// family recorded in the font's own name table (the first face of a
    /// collection), so the file must exist and parse.
    pub fn family_name(&self) -> Result<String> {
        match self {
            FontSelection::Family(name) => Ok(name.clone()),
            FontSelection::File(path) => read_family_name(path),
        }
    }

    /// The font file backing this selection, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            FontSelection::File(path) => Some(path),
            FontSelection::Family(_) => None,
        }
    }
}

fn read_family_name(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SemanticMapError::config(format!(
            "font file not found: {}",
            path.display()
        )));
    }
    let data = std::fs::read(path)?;
    let face = ttf_parser::Face::parse(&data, 0).map_err(|e| {
        SemanticMapError::config(format!("cannot read font {}: {}", path.display(), e))
    })?;

    let lookup = |id: u16| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id)
            .find_map(|name| name.to_string())
            .filter(|family| !family.trim().is_empty())
    };
    lookup(name_id::TYPOGRAPHIC_FAMILY)
        .or_else(|| lookup(name_id::FAMILY))
        .ok_or_else(|| {
            SemanticMapError::config(format!(
                "font {} has no family name",
                path.display()
            ))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub language: Language,
    pub palette: Palette,
    pub accent: Rgb,
    pub background: Rgb,
    pub display_label: String,
    pub font: FontSelection,
    pub separator: String,
    pub summary_title: String,
    pub question_prefix: String,
}

impl LanguageProfile {
    pub fn japanese(font: FontSelection) -> Self {
        Self {
            language: Language::Japanese,
            palette: Palette::blues(),
            accent: Rgb(0x3f, 0xa9, 0xf5),
            background: Rgb(0x0d, 0x11, 0x17),
            display_label: "日本語版".to_string(),
            font,
            separator: "・".to_string(),
            summary_title: "AI自己要約".to_string(),
            question_prefix: "質問：".to_string(),
        }
    }

    pub fn english(font: FontSelection) -> Self {
        Self {
            language: Language::English,
            palette: Palette::oranges(),
            accent: Rgb(0xff, 0xa6, 0x00),
            background: Rgb(0x0d, 0x11, 0x17),
            display_label: "English Version".to_string(),
            font,
            separator: " / ".to_string(),
            summary_title: "AI Self-Summary".to_string(),
            question_prefix: "Question: ".to_string(),
        }
    }

    pub fn for_language(language: Language, font: FontSelection) -> Self {
        match language {
            Language::Japanese => Self::japanese(font),
            Language::English => Self::english(font),
        }
    }

    pub fn title(&self) -> String {
        format!("AI Meaning Map — {}", self.display_label)
    }

    pub fn subtitle(&self, question: &str) -> String {
        format!("{}{}", self.question_prefix, question)
    }
}
