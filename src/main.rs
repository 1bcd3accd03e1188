//! tagspan - print HTML source with incremental highlighting
//!
//! Loads a file, highlights it in full, then replays edits given on the
//! command line through the incremental watcher before printing.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use tagspan::error::{Error, Result};
use tagspan::{logging, render, Config, HtmlStyleWatcher, SpannedBuffer};

/// One `--edit` argument
#[derive(Debug, PartialEq, Eq)]
struct EditArg {
    pos: usize,
    remove: usize,
    text: String,
}

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    edits: Vec<EditArg>,
    spans: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --help and --version before anything else
    if let Some(first) = args.first() {
        match first.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    logging::init();

    let options = parse_args(&args)?;
    let Some(file) = &options.file else {
        print_usage();
        return Err(Error::Usage("no input file".to_string()));
    };

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let mut buffer = SpannedBuffer::from_file(file)?;
    let mut watcher = HtmlStyleWatcher::new(&config);
    watcher.highlight_all(&mut buffer);

    for edit in &options.edits {
        buffer.edit(&mut watcher, edit.pos, edit.remove, &edit.text)?;
    }

    let mut out = io::stdout().lock();
    if options.spans {
        render::render_spans(&mut out, &buffer)?;
    } else {
        render::render(&mut out, &buffer)?;
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-e" | "--edit" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Usage(format!("{} needs POS:REMOVE:TEXT", arg)))?;
                options.edits.push(parse_edit(value)?);
            }
            "-c" | "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Usage(format!("{} needs a path", arg)))?;
                options.config = Some(PathBuf::from(value));
            }
            "--spans" => options.spans = true,
            s if s.starts_with('-') => {
                return Err(Error::Usage(format!("unknown option: {}", s)));
            }
            _ => {
                if options.file.is_some() {
                    return Err(Error::Usage("only one input file is supported".to_string()));
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(options)
}

/// Parse `POS:REMOVE:TEXT`; TEXT may contain colons and `\n`, `\t`, `\\` escapes
fn parse_edit(value: &str) -> Result<EditArg> {
    let bad = || Error::Usage(format!("bad edit {:?}, expected POS:REMOVE:TEXT", value));
    let mut parts = value.splitn(3, ':');
    let pos = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
    let remove = parts.next().and_then(|r| r.parse().ok()).ok_or_else(bad)?;
    let text = unescape(parts.next().unwrap_or(""));
    Ok(EditArg { pos, remove, text })
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn print_usage() {
    println!("tagspan {} - incremental HTML highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: tagspan [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -e, --edit POS:REMOVE:TEXT  Replace REMOVE bytes at POS with TEXT (repeatable)");
    println!("  -c, --config PATH           Read settings from PATH instead of ~/.tagspan.toml");
    println!("      --spans                 List spans instead of printing styled text");
    println!("  -h, --help                  Show this help message");
    println!("  -V, --version               Show version information");
    println!();
    println!("Set RUST_LOG=debug to see every restyled range.");
}

fn print_version() {
    println!("tagspan {}", env!("CARGO_PKG_VERSION"));
}
