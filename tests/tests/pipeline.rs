use application::semantic_map_service::SemanticMapService;
use domain::language::{FontSelection, Language, LanguageProfile};
use domain::models::Question;
use infrastructure::clusterer::{Clusterer, CLUSTER_COUNT};
use infrastructure::embedder::Embedder;
use infrastructure::reducer::Reducer;
use presentation::figure::Figure;
use presentation::runner::{run_semantic_maps, OutputMode, RunOptions};
use std::path::PathBuf;
use tests::{StubGenerator, ENGLISH_ANSWERS, TRANSLATION};

const MARKED_SUMMARY: &str =
    "① All answers describe an inner essence. ② Some are religious, some psychological. ③ Short and abstract overall.";

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("semantic_map_{}_{}", name, std::process::id()))
}

fn options(output: OutputMode, report: Option<PathBuf>) -> RunOptions {
    RunOptions {
        output,
        font_ja: FontSelection::Family("Meiryo".into()),
        font_en: FontSelection::Family("Arial".into()),
        report,
    }
}

#[test]
fn ten_responses_give_expected_shapes() {
    let space = Embedder::new().fit_transform(&ENGLISH_ANSWERS).unwrap();
    assert_eq!(space.n_documents(), 10);
    assert!(space.n_terms() >= 5);
    assert_eq!(space.matrix.dim(), (10, space.vocabulary.len()));

    let points = Reducer::project(&space).unwrap();
    assert_eq!(points.len(), 10);

    let clusters = Clusterer::default().cluster(&space, " / ").unwrap();
    assert_eq!(clusters.assignments.len(), 10);
    assert!(clusters.assignments.iter().all(|&a| a < CLUSTER_COUNT));
    assert_eq!(clusters.clusters.iter().map(|c| c.count).sum::<usize>(), 10);
}

#[test]
fn clustering_repeats_exactly() {
    let space = Embedder::new().fit_transform(&ENGLISH_ANSWERS).unwrap();
    let runs: Vec<_> = (0..3)
        .map(|_| Clusterer::default().cluster(&space, " / ").unwrap().assignments)
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn too_few_samples_fail_as_configuration_errors() {
    let space = Embedder::new().fit_transform(&ENGLISH_ANSWERS[..2]).unwrap();
    assert!(Reducer::project(&space).unwrap_err().is_config());
    assert!(Clusterer::default().cluster(&space, " / ").unwrap_err().is_config());
    assert!(SemanticMapService::new(StubGenerator::new(""), 2).err().unwrap().is_config());
}

#[tokio::test]
async fn translation_is_non_empty_and_trimmed() {
    let service = SemanticMapService::new(StubGenerator::new(""), 10).unwrap();
    let translated = service.translate("魂とは何か？30文字以内で答えてください。").await.unwrap();
    assert!(!translated.trim().is_empty());
    assert_eq!(translated, TRANSLATION);
}

#[tokio::test]
async fn summary_sections_follow_markers() {
    let service = SemanticMapService::new(StubGenerator::new(MARKED_SUMMARY), 10).unwrap();
    let profile = LanguageProfile::english(FontSelection::Family("Arial".into()));
    let map = service
        .build_map(Question::new(Language::English, TRANSLATION), &profile)
        .await
        .unwrap();
    let figure = Figure::compose(&map, &profile).unwrap();
    assert_eq!(figure.summary_sections.len(), 3);
    assert!(figure.summary_sections.iter().all(|s| !s.is_empty()));
    assert!(figure.summary_sections[0][0].starts_with('①'));
    assert!(figure.summary_sections[2][0].starts_with('③'));

    let plain = SemanticMapService::new(StubGenerator::new("  Mostly abstract answers.  "), 10).unwrap();
    let map = plain
        .build_map(Question::new(Language::English, TRANSLATION), &profile)
        .await
        .unwrap();
    let figure = Figure::compose(&map, &profile).unwrap();
    assert_eq!(figure.summary_sections, vec![vec!["Mostly abstract answers.".to_string()]]);
}

#[tokio::test]
async fn full_run_saves_both_figures_and_report() {
    let dir = scratch_dir("figures");
    let report = dir.join("report.json");
    let service = SemanticMapService::new(StubGenerator::new(MARKED_SUMMARY), 10).unwrap();

    let maps = run_semantic_maps(
        &service,
        "魂とは何か？30文字以内で答えてください。",
        &options(OutputMode::Save(dir.clone()), Some(report.clone())),
    )
    .await
    .unwrap();

    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0].language(), Language::Japanese);
    assert_eq!(maps[1].language(), Language::English);
    assert_eq!(maps[1].question.text, TRANSLATION);
    for map in &maps {
        assert_eq!(map.responses.len(), 10);
        assert_eq!(map.clusters.total(), 10);
        assert_eq!(map.points.len(), 10);
    }
    assert!(maps[0].clusters.clusters.iter().all(|c| !c.label.contains(" / ")));

    for code in ["ja", "en"] {
        let svg = std::fs::read_to_string(dir.join(format!("semantic_map_{}.svg", code))).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("AI Semantic Space"));
        assert!(svg.contains("Cluster Distribution"));
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["maps"].as_array().map(|m| m.len()), Some(2));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn saved_figure_uses_family_from_font_file() {
    let dir = scratch_dir("font_file");
    let service = SemanticMapService::new(StubGenerator::new(MARKED_SUMMARY), 5).unwrap();
    let mut opts = options(OutputMode::Save(dir.clone()), None);
    opts.font_en = FontSelection::File(
        concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/DejaVuSansMono.ttf").into(),
    );
    run_semantic_maps(&service, "魂とは何か？", &opts).await.unwrap();

    let svg = std::fs::read_to_string(dir.join("semantic_map_en.svg")).unwrap();
    assert!(svg.contains("@font-face"));
    assert!(svg.contains("DejaVu Sans Mono"));
    assert!(svg.contains("DejaVuSansMono.ttf"));
    assert!(!svg.contains("font-family=\"DejaVuSansMono\""));

    let ja = std::fs::read_to_string(dir.join("semantic_map_ja.svg")).unwrap();
    assert!(!ja.contains("@font-face"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn display_mode_runs_without_writing_files() {
    let service = SemanticMapService::new(StubGenerator::new(MARKED_SUMMARY), 5).unwrap();
    let maps = run_semantic_maps(&service, "魂とは何か？", &options(OutputMode::Display, None))
        .await
        .unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[1].responses.len(), 5);
}

#[tokio::test]
async fn any_failed_request_aborts_the_whole_run() {
    // translation + 10 Japanese samples succeed, the Japanese summary fails
    let service =
        SemanticMapService::new(StubGenerator::new(MARKED_SUMMARY).failing_after(11), 10).unwrap();
    let err = run_semantic_maps(&service, "魂とは何か？", &options(OutputMode::Display, None))
        .await
        .unwrap_err();
    assert!(err.is_service());
}

#[tokio::test]
async fn missing_font_file_fails_before_any_request() {
    let stub = StubGenerator::new(MARKED_SUMMARY);
    let service = SemanticMapService::new(stub, 10).unwrap();
    let mut opts = options(OutputMode::Display, None);
    opts.font_ja = FontSelection::File("/nonexistent/meiryo.ttc".into());
    let err = run_semantic_maps(&service, "魂とは何か？", &opts).await.unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn prompts_follow_the_pipeline_order() {
    let stub = StubGenerator::new(MARKED_SUMMARY);
    let service = SemanticMapService::new(&stub, 3).unwrap();
    run_semantic_maps(&service, "魂とは何か？", &options(OutputMode::Display, None))
        .await
        .unwrap();

    let prompts = stub.prompts();
    assert_eq!(prompts.len(), 1 + 2 * (3 + 1));
    assert!(prompts[0].starts_with("Translate this question"));
    assert!(prompts[1..4].iter().all(|p| p == "魂とは何か？"));
    assert!(prompts[4].contains("【回答群】"));
    assert!(prompts[5..8].iter().all(|p| p == TRANSLATION));
    assert!(prompts[8].contains("[Responses]"));
}

#[tokio::test]
async fn missing_font_file_sends_no_requests() {
    let stub = StubGenerator::new(MARKED_SUMMARY);
    let service = SemanticMapService::new(&stub, 3).unwrap();
    let mut opts = options(OutputMode::Display, None);
    opts.font_en = FontSelection::File("/nonexistent/arial.ttf".into());
    assert!(run_semantic_maps(&service, "魂とは何か？", &opts).await.is_err());
    assert!(stub.prompts().is_empty());
}
