use std::fs;
use std::io::Write;
use tempfile::TempDir;

use docsearch_core::config::{Config, Mode, Settings};
use docsearch_core::loader::CorpusLoader;
use docsearch_core::traits::{ArtifactLocator, FsArtifactLocator};
use docsearch_core::LoadError;

#[test]
fn jsonl_corpus_skips_malformed_lines() {
    let tmp = TempDir::new().unwrap();
    let mut f = fs::File::create(tmp.path().join("corpus.jsonl")).unwrap();
    writeln!(f, r#"{{"id":"a","title":"Contract Law","text":"This contract governs the sale of goods."}}"#).unwrap();
    writeln!(f, "{{broken").unwrap();
    writeln!(f).unwrap();
    writeln!(f, r#"{{"title":"missing id"}}"#).unwrap();
    writeln!(f, r#"{{"id":"b","title":"Tort Law","text":"Negligence requires a breach of duty."}}"#).unwrap();

    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    assert_eq!(corpus.len(), 2);
    let a = corpus.get(0).unwrap();
    assert_eq!(a.id, "a");
    assert_eq!(a.title, "Contract Law");
    assert_eq!(a.raw_text, "Contract Law This contract governs the sale of goods.");
    assert_eq!(a.normalized_tokens.len(), a.raw_text.split_whitespace().count());
    assert_eq!(a.normalized_tokens[0], "contract");
    assert_eq!(a.normalized_tokens.last().map(String::as_str), Some("goods"));
    assert_eq!(corpus.get(1).unwrap().id, "b");
}

#[test]
fn jsonl_takes_precedence_over_txt_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("corpus.jsonl"), "{\"id\":\"j\",\"text\":\"from jsonl\"}\n").unwrap();
    fs::write(tmp.path().join("other.txt"), "from txt").unwrap();

    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.get(0).unwrap().id, "j");
}

#[test]
fn txt_directory_is_walked_recursively() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("nested/deeper")).unwrap();
    fs::write(tmp.path().join("b.txt"), "bravo text").unwrap();
    fs::write(tmp.path().join("nested/deeper/a.txt"), "alpha  text\n").unwrap();
    fs::write(tmp.path().join("nested/ignored.md"), "not a corpus file").unwrap();

    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    let ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"], "sorted by full path");
    let a = corpus.get(1).unwrap();
    assert_eq!(a.title, "");
    assert_eq!(a.raw_text, "alpha  text");
}

#[test]
fn empty_directory_gives_empty_corpus() {
    let tmp = TempDir::new().unwrap();
    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    assert!(corpus.is_empty());
}

#[test]
fn missing_source_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = CorpusLoader::new().load(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, LoadError::SourceMissing(_)));
}

#[test]
fn duplicate_ids_keep_first() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("corpus.jsonl"),
        "{\"id\":\"x\",\"text\":\"first\"}\n{\"id\":\"x\",\"text\":\"second\"}\n",
    )
    .unwrap();
    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.get(0).unwrap().raw_text, "first");
}

#[test]
fn custom_jsonl_name_and_direct_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("laws.jsonl");
    fs::write(&path, "{\"id\":\"l1\",\"text\":\"ley\"}\n").unwrap();

    let by_name = CorpusLoader::with_jsonl_name("laws.jsonl").load(tmp.path()).expect("load");
    assert_eq!(by_name.len(), 1);
    let by_file = CorpusLoader::new().load(&path).expect("load");
    assert_eq!(by_file.get(0).unwrap().id, "l1");
}

#[test]
fn artifact_probe_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), "x").unwrap();
    fs::write(tmp.path().join("doc.html"), "x").unwrap();
    let locator = FsArtifactLocator::new(tmp.path());

    let found = locator.locate("doc").expect("artifact");
    assert_eq!(found.file_name, "doc.html");
    assert!(locator.locate("missing").is_none());
    assert!(locator.locate("../doc").is_none());
}

#[test]
fn settings_follow_mode_defaults() {
    let base = std::path::Path::new("/srv/app");
    let mut settings = Settings::default();
    assert_eq!(settings.mode, Mode::Public);
    assert!(!settings.dense_enabled());
    assert_eq!(settings.corpus_dir(base), base.join("data/uploads"));

    settings.mode = Mode::Thesis;
    assert!(settings.dense_enabled());
    assert_eq!(settings.corpus_dir(base), base.join("data/static_corpus"));
    assert_eq!(settings.artifacts_dir(base), base.join("data/static_corpus"));

    settings.embedding.enabled = Some(false);
    assert!(!settings.dense_enabled());
    assert_eq!(settings.effective_top_k(None), 30);
    assert_eq!(settings.effective_top_k(Some(1000)), 100);
}

#[test]
fn config_from_toml_figment() {
    use figment::providers::{Format, Toml};
    let figment = figment::Figment::new().merge(Toml::string(
        "mode = \"thesis\"\n[corpus]\ndir = \"/data/corpus\"\n[search]\ndefault_top_k = 5\n",
    ));
    let config = Config::from_figment(figment).expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.mode, Mode::Thesis);
    assert_eq!(settings.search.default_top_k, 5);
    assert_eq!(settings.search.max_top_k, 100);
    assert_eq!(settings.corpus_dir(std::path::Path::new("/ignored")), std::path::PathBuf::from("/data/corpus"));
    let dir: String = config.get("corpus.dir").expect("key");
    assert_eq!(dir, "/data/corpus");
}

#[test]
fn config_rejects_zero_default_top_k() {
    use figment::providers::{Format, Toml};
    let figment = figment::Figment::new().merge(Toml::string("[search]\ndefault_top_k = 0\n"));
    assert!(Config::from_figment(figment).is_err());
}
