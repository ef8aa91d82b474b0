use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use postdoc::{load_collection, DocumentSink, FileSink, WriterSink};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("postdoc")
        .about("Convert a Postman collection to a Markdown document")
        .arg(
            Arg::new("input")
                .help("Collection JSON file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory to write the Markdown file into (default: current directory)"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Output file name without extension (default: input file stem)"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the document instead of writing a file")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["output-dir", "name"]),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn default_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection".to_string())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    // `input` is a required argument, so clap guarantees it is present
    let input = PathBuf::from(
        matches
            .get_one::<String>("input")
            .context("missing input file")?,
    );

    let collection = load_collection(&input)
        .with_context(|| format!("Failed to load collection from {}", input.display()))?;
    let markdown = postdoc::render(&collection);
    debug!(bytes = markdown.len(), "rendered document");

    let mut sink: Box<dyn DocumentSink> = if matches.get_flag("stdout") {
        Box::new(WriterSink::new(io::stdout().lock()))
    } else {
        let name = matches
            .get_one::<String>("name")
            .cloned()
            .unwrap_or_else(|| default_name(&input));
        let dir = matches.get_one::<String>("output-dir").map(Path::new);
        Box::new(FileSink::new(dir, &name))
    };

    sink.persist(&markdown)
        .context("Failed to write documentation")?;

    Ok(())
}
