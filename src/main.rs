use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordtree::{
    cli::{Repl, WordtreeArgs},
    dictionary::{Dictionary, WordStore},
};

fn main() -> anyhow::Result<()> {
    let args = WordtreeArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(args.log_directive().parse()?))
        .with_writer(io::stderr)
        .init();

    let store = WordStore::new(&args.dictionary);
    info!(path = %store.path().display(), "creating BK-tree");
    let mut dictionary = Dictionary::open(&store, args.config())
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    println!("The BK-tree has been created.\n");

    let stdin = io::stdin();
    Repl::new(&mut dictionary, &store, stdin.lock(), io::stdout()).run()
}
