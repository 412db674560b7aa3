//! Backend-independent layout of one semantic map figure.
//!
//! Colours, wrapped labels and summary sections are decided here once, so
//! the SVG and terminal renderers draw the same content.

use domain::language::{Language, LanguageProfile, Rgb};
use domain::models::SemanticMap;
use domain::summary::split_sections;
use shared::types::Result;
use shared::utils::wrap_lines;
use std::path::{Path, PathBuf};

pub const SCATTER_TITLE: &str = "AI Semantic Space";
pub const PIE_TITLE: &str = "Cluster Distribution";
pub const AXIS_LABELS: [&str; 3] = ["Axis 1", "Axis 2", "Axis 3"];
pub const PIE_LABEL_WIDTH: usize = 20;
pub const SUMMARY_WIDTH: usize = 85;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// 1-based response index, drawn next to the marker.
    pub index: usize,
    pub coords: [f64; 3],
    pub cluster: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub cluster: usize,
    /// Fraction of all responses, in `(0, 1]`.
    pub share: f64,
    pub label_lines: Vec<String>,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub language: Language,
    pub title: String,
    pub subtitle: String,
    pub accent: Rgb,
    pub background: Rgb,
    pub font_family: String,
    /// Font file the family was read from, referenced by saved figures.
    pub font_file: Option<PathBuf>,
    pub points: Vec<ScatterPoint>,
    pub bounds: [(f64, f64); 3],
    pub wedges: Vec<Wedge>,
    pub summary_title: String,
    /// Each section already wrapped to [`SUMMARY_WIDTH`].
    pub summary_sections: Vec<Vec<String>>,
}

impl Figure {
    /// Fails only when the profile names a font file that is missing or
    /// cannot be read as a font.
    pub fn compose(map: &SemanticMap, profile: &LanguageProfile) -> Result<Self> {
        let font_family = profile.font.family_name()?;
        let n = map.points.len();

        let marker_colors = profile.palette.linspace(0.5, 1.0, n);
        let points = map
            .points
            .points
            .iter()
            .zip(map.responses.iter())
            .enumerate()
            .map(|(i, (coords, response))| ScatterPoint {
                index: response.index,
                coords: *coords,
                cluster: map.clusters.assignments.get(i).copied().unwrap_or(0),
                color: marker_colors[i % marker_colors.len().max(1)],
            })
            .collect();

        let occupied: Vec<_> = map.clusters.non_empty().collect();
        let wedge_colors = profile.palette.linspace(0.2, 1.0, occupied.len());
        let wedges = occupied
            .iter()
            .zip(wedge_colors)
            .map(|(cluster, color)| Wedge {
                cluster: cluster.id,
                share: map.clusters.share_percent(cluster) / 100.0,
                label_lines: wrap_lines(
                    &format!("{} ({:.1}%)", cluster.label, map.clusters.share_percent(cluster)),
                    PIE_LABEL_WIDTH,
                ),
                color,
            })
            .collect();

        Ok(Self {
            language: profile.language,
            title: profile.title(),
            subtitle: profile.subtitle(&map.question.text),
            accent: profile.accent,
            background: profile.background,
            font_family,
            font_file: profile.font.file().map(Path::to_path_buf),
            points,
            bounds: map.points.bounds(),
            wedges,
            summary_title: profile.summary_title.clone(),
            summary_sections: summary_sections(&map.summary),
        })
    }

    /// The summary panel as one block: sections separated by blank lines.
    pub fn summary_text(&self) -> String {
        self.summary_sections
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Splits a raw summary on its section markers and wraps each section.
pub fn summary_sections(summary: &str) -> Vec<Vec<String>> {
    split_sections(summary)
        .iter()
        .map(|section| wrap_lines(section, SUMMARY_WIDTH))
        .filter(|lines| !lines.is_empty())
        .collect()
}
