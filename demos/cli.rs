use std::error;
use std::fs;

use bibtex::{Document, Entry, Parser};

use clap::Parser as CLIParser;
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "serde_json"))]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only entries with this key
    #[clap(short, long)]
    query_id: Option<String>,
}

#[cfg(feature = "serde_json")]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only entries with this key
    #[clap(short, long)]
    query_id: Option<String>,

    /// Print the entries as JSON
    #[clap(long)]
    json: bool,
}

fn load(s: &Settings) -> Result<Document, Box<dyn error::Error>> {
    let src = fs::read_to_string(&s.input)?;
    let p = Parser::from_string(src);
    let doc = p.parse().map_err(|err| format!("{}: {}", s.input, err))?;
    Ok(doc)
}

fn select<'d>(s: &Settings, doc: &'d Document) -> Vec<&'d Entry> {
    let selected: Vec<&Entry> = match &s.query_id {
        Some(query) => doc.iter().filter(|entry| &entry.key == query).collect(),
        None => doc.iter().collect(),
    };
    if selected.is_empty() {
        tracing::info!(query = ?s.query_id, "no entries to print");
    }
    selected
}

fn print_human_readable(entries: &[&Entry]) {
    for entry in entries {
        println!("type = {}", entry.kind);
        println!("key = {}", entry.key);
        for field in entry.fields.iter() {
            println!("\t{}\t= {}", field.kind, field.value);
        }
    }
}

#[cfg(feature = "serde_json")]
fn print_json(entries: &[&Entry]) -> Result<(), Box<dyn error::Error>> {
    println!("{}", serde_json::to_string(entries)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();
    let doc = load(&settings)?;
    let entries = select(&settings, &doc);

    #[cfg(feature = "serde_json")]
    {
        if settings.json {
            return print_json(&entries);
        }
    }
    print_human_readable(&entries);

    Ok(())
}
