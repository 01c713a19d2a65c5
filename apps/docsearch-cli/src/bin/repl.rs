use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use docsearch_cli::{init_tracing, print_results, App};
use docsearch_core::{SearchError, Strategy};

const HELP: &str = "\
Type a query to search. Commands:
  :dense | :lexical   switch strategy
  :k <n>              set result count
  :json               toggle JSON output
  :rebuild            reload the corpus in the background
  :stats              show the current generation
  :quit";

fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = App::bootstrap()?;
    let mut strategy = Strategy::Lexical;
    let mut top_k = app.settings.effective_top_k(None);
    let mut json = false;
    let mut rebuilds: Vec<thread::JoinHandle<()>> = Vec::new();

    println!("docsearch repl ({} documents). :help for commands.", app.engine.stats().map_or(0, |s| s.documents));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", strategy);
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let line = line.trim();
        if line.is_empty() { continue; }
        match line.split_once(' ').map_or((line, ""), |(c, rest)| (c, rest.trim())) {
            (":quit" | ":q" | ":exit", _) => break,
            (":help", _) => println!("{}", HELP),
            (":dense", _) => strategy = Strategy::Dense,
            (":lexical", _) => strategy = Strategy::Lexical,
            (":json", _) => json = !json,
            (":k", n) => match n.parse::<usize>() {
                Ok(n) => top_k = app.settings.effective_top_k(Some(n)),
                Err(_) => eprintln!("usage: :k <n>"),
            },
            (":stats", _) => match app.engine.stats() {
                Some(s) => println!("generation {} | {} docs | {} terms | dense {}", s.generation, s.documents, s.vocabulary,
                    s.dense_dim.map_or_else(|| "unavailable".to_string(), |d| format!("{} dims", d))),
                None => println!("no corpus loaded"),
            },
            (":rebuild", _) => {
                let engine = Arc::clone(&app.engine);
                let dir = app.corpus_dir.clone();
                rebuilds.retain(|h| !h.is_finished());
                rebuilds.push(thread::spawn(move || match engine.build_or_rebuild_corpus(&dir) {
                    Ok(g) => eprintln!("rebuilt: generation {} ({} documents)", g.number(), g.corpus().len()),
                    Err(e) => eprintln!("rebuild failed: {}", e),
                }));
                println!("rebuilding in the background; queries keep using the current corpus");
            }
            _ if line.starts_with(':') => eprintln!("unknown command {}; :help for commands", line),
            _ => match app.engine.search(line, top_k, strategy) {
                Ok(results) => print_results(line, &results, json)?,
                Err(e @ SearchError::StrategyUnavailable { .. }) => eprintln!("{} (try :lexical)", e),
                Err(e) => eprintln!("error: {}", e),
            },
        }
    }
    for handle in rebuilds {
        let _ = handle.join();
    }
    Ok(())
}
