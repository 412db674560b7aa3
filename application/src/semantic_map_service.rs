use domain::generator::TextGenerator;
use domain::language::LanguageProfile;
use domain::models::{ClusterAssignment, ProjectedPoints, Question, ResponseSet, SemanticMap};
use domain::prompts;
use infrastructure::clusterer::Clusterer;
use infrastructure::config::validate_samples;
use infrastructure::embedder::Embedder;
use infrastructure::reducer::Reducer;
use shared::error::SemanticMapError;
use shared::telemetry::Telemetry;
use shared::types::Result;
use shared::utils::flatten_completion;

/// Vector-space results for one response set.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub vocabulary_size: usize,
    pub points: ProjectedPoints,
    pub clusters: ClusterAssignment,
}

/// Runs the sampling and analysis pipeline against any [`TextGenerator`].
/// Requests are issued one at a time; the first failure ends the run.
pub struct SemanticMapService<G> {
    generator: G,
    samples: usize,
    embedder: Embedder,
    clusterer: Clusterer,
}

impl<G: TextGenerator> SemanticMapService<G> {
    pub fn new(generator: G, samples: usize) -> Result<Self> {
        validate_samples(samples)?;
        Ok(Self {
            generator,
            samples,
            embedder: Embedder::new(),
            clusterer: Clusterer::default(),
        })
    }

    pub fn with_embedder(mut self, embedder: Embedder) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub async fn translate(&self, question: &str) -> Result<String> {
        let telemetry = Telemetry::new("translate");
        let raw = self
            .generator
            .generate(&prompts::translation_prompt(question))
            .await?;
        let translated = raw.trim().to_string();
        if translated.is_empty() {
            return Err(SemanticMapError::service("translation came back empty"));
        }
        telemetry.finish();
        tracing::info!(translated = %translated, "question translated");
        Ok(translated)
    }

    pub async fn collect_responses(&self, question: &Question) -> Result<ResponseSet> {
        let telemetry = Telemetry::new("collect");
        let mut responses = ResponseSet::new(question.language);
        for i in 1..=self.samples {
            tracing::info!(language = %question.language, "collecting response {}/{}", i, self.samples);
            let raw = self.generator.generate(&question.text).await?;
            responses.push(flatten_completion(&raw));
        }
        telemetry.finish();
        Ok(responses)
    }

    /// TF-IDF, projection and clustering. Clustering runs on the full
    /// weight matrix; the projection only feeds the scatter panel.
    pub fn analyze(&self, responses: &ResponseSet, separator: &str) -> Result<Analysis> {
        let telemetry = Telemetry::new("analyze");
        let space = self.embedder.embed(responses)?;
        let points = Reducer::project(&space)?;
        let clusters = self.clusterer.cluster(&space, separator)?;
        telemetry.finish();
        Ok(Analysis {
            vocabulary_size: space.n_terms(),
            points,
            clusters,
        })
    }

    pub async fn summarize(&self, question: &Question, responses: &ResponseSet) -> Result<String> {
        let telemetry = Telemetry::new("summarize");
        let prompt = prompts::summary_prompt(question.language, &question.text, responses);
        let summary = self.generator.generate(&prompt).await?.trim().to_string();
        telemetry.finish();
        Ok(summary)
    }

    /// Everything for one language up to, but not including, rendering.
    pub async fn build_map(&self, question: Question, profile: &LanguageProfile) -> Result<SemanticMap> {
        let responses = self.collect_responses(&question).await?;
        let analysis = self.analyze(&responses, &profile.separator)?;
        let summary = self.summarize(&question, &responses).await?;
        Ok(SemanticMap {
            question,
            responses,
            vocabulary_size: analysis.vocabulary_size,
            points: analysis.points,
            clusters: analysis.clusters,
            summary,
        })
    }
}
