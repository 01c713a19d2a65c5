use std::collections::HashSet;
use std::fs;

use docsearch_core::normalize::query_terms;
use docsearch_core::CorpusLoader;
use docsearch_text::{snippet, LexicalIndex};

#[test]
fn lexical_full_flow() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("corpus.jsonl"),
        concat!(
            r#"{"id":"a","title":"Contract Law","text":"This contract governs the sale of goods."}"#, "\n",
            r#"{"id":"b","title":"Tort Law","text":"Negligence requires a breach of duty."}"#, "\n",
            r#"{"id":"c","title":"Código Civil","text":"El CONTRATO de compraventa; contrato y obligación."}"#, "\n",
        ),
    )
    .unwrap();

    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    let index = LexicalIndex::build(&corpus);
    assert_eq!(index.doc_count(), 3);

    let terms = query_terms("contract");
    let scores = index.score(&terms);
    assert!(scores[0] > 0.0);
    assert_eq!(scores[1], 0.0);
    assert_eq!(scores[2], 0.0, "contrato is a different term");

    // Accents and case fold away on both sides.
    let scores = index.score(&query_terms("CONTRATO codigo"));
    assert!(scores[2] > 0.0);

    let set: HashSet<String> = terms.into_iter().collect();
    let snip = snippet::extract(corpus.get(0).unwrap(), &set);
    assert!(snip.contains("contract") || snip.contains("Contract"));
    assert_eq!(snippet::extract(corpus.get(1).unwrap(), &set), "");
}

#[test]
fn law_appears_everywhere_but_still_scores() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("one.txt"), "law of contracts").unwrap();
    fs::write(tmp.path().join("two.txt"), "law of torts and more law").unwrap();
    let corpus = CorpusLoader::new().load(tmp.path()).expect("load");
    let index = LexicalIndex::build(&corpus);
    let scores = index.score(&query_terms("law"));
    assert!(scores.iter().all(|s| *s > 0.0));
    assert!(scores[1] > scores[0], "tf=2 beats tf=1 despite longer doc");
}
