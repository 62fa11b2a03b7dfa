use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use clap_verbosity_flag::WarnLevel;
use datdump::bencode::{self, DecodeOptions, MAX_DEPTH};
use datdump::convert::names_and_paths;
use datdump::escape::{Projector, Scheme};
use datdump::render::{self, RenderOptions, DEFAULT_INDENT};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Convert a bencoded client state file (e.g. uTorrent's resume.dat) to JSON
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// .dat file to convert
    datfile: PathBuf,

    /// Save output to file instead of stdout
    #[arg(short, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How to escape binary strings in JSON output [hex, base64, raw]
    #[arg(short, value_name = "ESCAPE", default_value_t = Scheme::Base64)]
    escape: Scheme,

    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT, conflicts_with = "compact")]
    indent: usize,

    /// Write the JSON on a single line
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,

    /// Ignore bytes after the top-level value instead of failing
    #[arg(long, action = ArgAction::SetTrue)]
    allow_trailing: bool,

    /// Maximum nesting of lists and dictionaries
    #[arg(
        long,
        value_name = "N",
        default_value_t = MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_DEPTH as u64)
    )]
    max_depth: usize,

    /// Print each top-level entry's name and path instead of JSON
    #[arg(long, action = ArgAction::SetTrue)]
    names: bool,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(io::stderr)
        .init();

    let contents = std::fs::read(&cli.datfile)
        .with_context(|| format!("failed to read {}", cli.datfile.display()))?;
    tracing::info!(path = %cli.datfile.display(), bytes = contents.len(), "read input");

    let decode_options = DecodeOptions {
        allow_trailing: cli.allow_trailing,
        max_depth: cli.max_depth,
    };
    let value = bencode::decode_with(&contents, &decode_options)
        .with_context(|| format!("failed to decode {}", cli.datfile.display()))?;

    let projector = Projector::new(cli.escape);
    let (root, stats) = projector.project_with_stats(&value);
    tracing::info!(
        scheme = %cli.escape,
        escaped = stats.escaped,
        tagged_keys = stats.tagged_keys,
        "projected value tree"
    );

    // Render fully before touching the output so a failure leaves nothing behind.
    let rendered = if cli.names {
        let mut listing = String::new();
        let entries = names_and_paths(&value, &projector).context("failed to list paths")?;
        for (name, path) in entries {
            listing.push_str(&format!("{name}\n    {path}\n"));
        }
        listing
    } else {
        let options = RenderOptions {
            indent: (!cli.compact).then_some(cli.indent),
        };
        let mut json =
            render::to_string_pretty(&root, &options).context("failed to render JSON")?;
        json.push('\n');
        json
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_all(BufWriter::new(file), &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => write_all(io::stdout().lock(), &rendered).context("failed to write stdout")?,
    }

    Ok(())
}

fn write_all<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}
