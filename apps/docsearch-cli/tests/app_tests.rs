use std::fs;

use docsearch_cli::App;
use docsearch_core::config::{Mode, Settings};
use docsearch_core::Strategy;

fn write_corpus(dir: &std::path::Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("corpus.jsonl"),
        concat!(
            r#"{"id":"a","title":"Contract Law","text":"This contract governs the sale of goods."}"#, "\n",
            r#"{"id":"b","title":"Tort Law","text":"Negligence requires a breach of duty."}"#, "\n",
        ),
    )
    .unwrap();
    fs::write(dir.join("a.pdf"), b"%PDF").unwrap();
}

#[test]
fn public_mode_serves_uploads_lexically() {
    let base = tempfile::tempdir().unwrap();
    write_corpus(&base.path().join("data/uploads"));

    let app = App::from_settings(Settings::default(), base.path()).unwrap();
    assert_eq!(app.corpus_dir, base.path().join("data/uploads"));
    assert!(!app.engine.dense_configured());

    let results = app.engine.search("contract", app.settings.effective_top_k(None), Strategy::Lexical).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].artifact.as_ref().unwrap().file_name, "a.pdf");
    assert!(app.engine.search("contract", 5, Strategy::Dense).is_err());
}

#[test]
fn thesis_mode_with_fake_embeddings_serves_dense() {
    let base = tempfile::tempdir().unwrap();
    write_corpus(&base.path().join("data/static_corpus"));
    let mut settings = Settings { mode: Mode::Thesis, ..Settings::default() };
    settings.embedding.fake = true;

    let app = App::from_settings(settings, base.path()).unwrap();
    assert!(app.engine.dense_configured());
    assert!(app.engine.stats().unwrap().dense_dim.is_some());
    let results = app.engine.search("contract", 5, Strategy::Dense).unwrap();
    assert_eq!(results[0].id, "a");
}

#[test]
fn missing_corpus_dir_fails_bootstrap() {
    let base = tempfile::tempdir().unwrap();
    assert!(App::from_settings(Settings::default(), base.path()).is_err());
}
