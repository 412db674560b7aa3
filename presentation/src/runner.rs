use crate::figure::Figure;
use crate::report::write_report;
use crate::svg_renderer::SvgRenderer;
use crate::terminal_renderer::TerminalRenderer;
use application::semantic_map_service::SemanticMapService;
use domain::generator::TextGenerator;
use domain::language::{FontSelection, Language, LanguageProfile};
use domain::models::{Question, SemanticMap};
use shared::types::Result;
use std::path::PathBuf;

pub trait FigureRenderer {
    fn render(&self, figure: &Figure) -> Result<()>;
}

/// Where finished figures go. Display and save are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Display,
    Save(PathBuf),
}

impl OutputMode {
    pub fn renderer(&self) -> Box<dyn FigureRenderer> {
        match self {
            OutputMode::Display => Box::new(TerminalRenderer),
            OutputMode::Save(dir) => Box::new(SvgRenderer::new(dir.clone())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: OutputMode,
    pub font_ja: FontSelection,
    pub font_en: FontSelection,
    pub report: Option<PathBuf>,
}

/// Translates `question`, then builds and renders the Japanese map followed
/// by the English one. Either both figures are produced or the run fails.
pub async fn run_semantic_maps<G: TextGenerator>(
    service: &SemanticMapService<G>,
    question: &str,
    options: &RunOptions,
) -> Result<Vec<SemanticMap>> {
    options.font_ja.family_name()?;
    options.font_en.family_name()?;
    let renderer = options.output.renderer();
    let translated = service.translate(question).await?;

    let runs = [
        (
            Question::new(Language::Japanese, question),
            LanguageProfile::japanese(options.font_ja.clone()),
        ),
        (
            Question::new(Language::English, translated),
            LanguageProfile::english(options.font_en.clone()),
        ),
    ];

    let mut maps = Vec::with_capacity(runs.len());
    for (question, profile) in runs {
        tracing::info!(language = %question.language, "building semantic map");
        let map = service.build_map(question, &profile).await?;
        let figure = Figure::compose(&map, &profile)?;
        renderer.render(&figure)?;
        maps.push(map);
    }

    if let Some(path) = &options.report {
        write_report(path, &maps)?;
    }
    Ok(maps)
}
