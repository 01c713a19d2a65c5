use std::env;

use docsearch_cli::{init_tracing, print_results, App};
use docsearch_core::Strategy;

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} <search|stats> [args...]", prog);
    eprintln!("  search <query> [--top-k N] [--dense] [--json]");
    eprintln!("  stats [--json]");
    std::process::exit(1);
}

fn parse_args() -> (String, String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { usage(&prog); }
    let cmd = args.remove(0);
    (prog, cmd, args)
}

struct SearchArgs { query: String, top_k: Option<usize>, strategy: Strategy, json: bool }

fn parse_search(prog: &str, args: &[String]) -> anyhow::Result<SearchArgs> {
    let mut out = SearchArgs { query: String::new(), top_k: None, strategy: Strategy::Lexical, json: false };
    let mut words = Vec::new();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--top-k" | "-k" => {
                let Some(v) = it.next() else { usage(prog) };
                out.top_k = Some(v.parse().map_err(|e| anyhow::anyhow!("Invalid --top-k '{}': {}", v, e))?);
            }
            "--dense" => out.strategy = Strategy::Dense,
            "--strategy" => {
                let Some(v) = it.next() else { usage(prog) };
                out.strategy = v.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
            }
            "--json" => out.json = true,
            _ => words.push(arg.as_str()),
        }
    }
    if words.is_empty() { usage(prog); }
    out.query = words.join(" ");
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (prog, cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => {
            let search = parse_search(&prog, &args)?;
            let app = App::bootstrap()?;
            let top_k = app.settings.effective_top_k(search.top_k);
            let results = app.engine.search(&search.query, top_k, search.strategy)?;
            print_results(&search.query, &results, search.json)?;
        }
        "stats" => {
            let app = App::bootstrap()?;
            let Some(stats) = app.engine.stats() else { anyhow::bail!("No corpus loaded") };
            if args.iter().any(|a| a == "--json") {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Corpus:      {}", app.corpus_dir.display());
                println!("Generation:  {}", stats.generation);
                println!("Documents:   {}", stats.documents);
                println!("Vocabulary:  {}", stats.vocabulary);
                println!("Avg length:  {:.1} tokens", stats.avg_doc_len);
                match stats.dense_dim {
                    Some(dim) => println!("Dense:       ready ({} dims)", dim),
                    None => println!("Dense:       unavailable"),
                }
            }
        }
        _ => { eprintln!("Unknown command: {}", cmd); usage(&prog); }
    }
    Ok(())
}
