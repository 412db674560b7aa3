use crate::runner::{run_semantic_maps, OutputMode, RunOptions};
use anyhow::Context;
use application::semantic_map_service::SemanticMapService;
use clap::Parser;
use colored::Colorize;
use infrastructure::config::Config;
use infrastructure::openai_client::OpenAiClient;
use std::path::PathBuf;

pub const DEFAULT_QUESTION: &str = "魂とは何か？30文字以内で答えてください。";

#[derive(Parser, Debug)]
#[command(name = "semantic_map")]
#[command(about = "Map how a language model answers one question in Japanese and English")]
#[command(long_about = "Map how a language model answers one question in Japanese and English.

Without --output-dir the maps are printed to the terminal as a coordinate \
table, cluster share bars and the summary. The 3-D scatter plot and the pie \
chart are only drawn in the SVG figures saved with --output-dir.")]
pub struct Cli {
    /// Number of responses to collect per language
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Model used for translation, sampling and summaries
    #[arg(long)]
    pub model: Option<String>,

    /// Save SVG figures (3-D scatter, pie chart, summary) into this directory
    /// instead of printing text tables
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Also write both maps as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Question in Japanese (it is translated to English automatically)
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

impl Cli {
    pub fn question_text(&self) -> String {
        let joined = self.question.join(" ");
        if joined.trim().is_empty() {
            DEFAULT_QUESTION.to_string()
        } else {
            joined.trim().to_string()
        }
    }
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Command-line flags win over environment settings.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(samples) = cli.samples {
            self.config.samples = samples;
        }
        if let Some(model) = &cli.model {
            self.config.model = model.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.config.output_dir = Some(dir.clone());
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_options(&self, cli: &Cli) -> RunOptions {
        RunOptions {
            output: match &self.config.output_dir {
                Some(dir) => OutputMode::Save(dir.clone()),
                None => OutputMode::Display,
            },
            font_ja: self.config.font_ja.clone(),
            font_en: self.config.font_en.clone(),
            report: cli.report.clone(),
        }
    }

    pub async fn run(&mut self, cli: Cli) -> anyhow::Result<()> {
        self.apply_overrides(&cli);
        self.config.validate()?;

        let client = OpenAiClient::new(&self.config)?;
        let service = SemanticMapService::new(client, self.config.samples)?;
        let question = cli.question_text();
        let options = self.run_options(&cli);

        tracing::info!(
            model = %self.config.model,
            samples = self.config.samples,
            "starting semantic map run"
        );
        let maps = run_semantic_maps(&service, &question, &options)
            .await
            .context("semantic map run failed")?;

        if let OutputMode::Save(dir) = &options.output {
            eprintln!(
                "{} {} figures written to {}",
                "Done:".green().bold(),
                maps.len(),
                dir.display()
            );
        }
        Ok(())
    }
}
