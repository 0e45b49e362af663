//! linetint - highlight source files in the terminal

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linetint::config::Settings;
use linetint::render::Renderer;
use linetint::syntax::{HighlightCache, HighlightEngine, SyntaxManager, Theme};
use linetint::ConfigError;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown language: {0} (try --list)")]
    UnknownLanguage(String),

    #[error("{0} (try --help)")]
    Usage(String),
}

/// Command line options; `None` means "use the settings file"
#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    lang: Option<String>,
    theme: Option<PathBuf>,
    language_dir: Option<PathBuf>,
    line_numbers: Option<bool>,
    tab_width: Option<usize>,
    width: Option<usize>,
    dump_spans: bool,
    list: bool,
}

#[derive(Debug, PartialEq)]
enum Action {
    Help,
    Version,
    Run(Options),
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LINETINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    let options = match parse_args(env::args().skip(1))? {
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            println!("linetint {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Action::Run(options) => options,
    };

    let mut settings = Settings::load();
    if options.theme.is_some() {
        settings.theme = options.theme.clone();
    }
    if options.language_dir.is_some() {
        settings.language_dir = options.language_dir.clone();
    }
    if let Some(line_numbers) = options.line_numbers {
        settings.line_numbers = line_numbers;
    }
    if let Some(tab_width) = options.tab_width {
        settings.tab_width = tab_width.clamp(1, 16);
    }
    if let Some(width) = options.width {
        settings.width = width;
    }

    let mut manager = SyntaxManager::new()?;
    if let Some(dir) = &settings.language_dir {
        let loaded = manager.load_dir(dir)?;
        debug!(dir = %dir.display(), loaded, "loaded language directory");
    }

    if options.list {
        for name in manager.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let text = read_input(options.file.as_ref())?;
    let language = match (&options.lang, &options.file) {
        (Some(name), _) => Some(
            manager
                .get_language(name)
                .ok_or_else(|| CliError::UnknownLanguage(name.clone()))?,
        ),
        (None, Some(path)) => manager.language_for(path),
        (None, None) => None,
    };
    let plain = HighlightEngine::default();
    let engine = language.map_or(&plain, |lang| lang.engine());
    debug!(language = language.map(|l| l.name.as_str()), "selected language");

    let lines: Vec<&str> = text.lines().collect();
    let mut cache = HighlightCache::new();
    cache.relex(engine, &lines);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.dump_spans {
        dump_spans(&mut out, &cache, lines.len())?;
    } else {
        let theme = match &settings.theme {
            Some(path) => Theme::load(path)?,
            None => Theme::default(),
        };
        let mut renderer = Renderer::new(&theme)
            .with_tab_width(settings.tab_width)
            .with_width(settings.width);
        if settings.line_numbers {
            renderer = renderer.with_line_numbers(lines.len());
        }
        for (idx, line) in lines.iter().enumerate() {
            renderer.render_line(&mut out, idx, line, cache.spans(idx).unwrap_or(&[]))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path).map_err(|source| {
            CliError::Config(ConfigError::Io {
                path: path.clone(),
                source,
            })
        }),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Print each line's state transition and raw spans
fn dump_spans<W: Write>(out: &mut W, cache: &HighlightCache, line_count: usize) -> io::Result<()> {
    for idx in 0..line_count {
        let entry = cache.entry_state(idx).region;
        let exit = cache.exit_state(idx).unwrap_or_default().region;
        write!(out, "{}: {}->{}", idx + 1, entry, exit)?;
        for span in cache.spans(idx).unwrap_or(&[]) {
            write!(out, " {}+{}:{}", span.offset, span.length, span.style.name())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Action, CliError> {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--lang" | "-l" => options.lang = Some(value(arg.as_str())?),
            "--theme" | "-t" => options.theme = Some(PathBuf::from(value(arg.as_str())?)),
            "--languages" => options.language_dir = Some(PathBuf::from(value(arg.as_str())?)),
            "--width" | "-w" => {
                let raw = value(arg.as_str())?;
                let width = raw
                    .parse()
                    .map_err(|_| CliError::Usage(format!("invalid width: {}", raw)))?;
                options.width = Some(width);
            }
            "--tab-width" => {
                let raw = value(arg.as_str())?;
                let tab_width = raw
                    .parse()
                    .map_err(|_| CliError::Usage(format!("invalid tab width: {}", raw)))?;
                options.tab_width = Some(tab_width);
            }
            "--line-numbers" | "-n" => options.line_numbers = Some(true),
            "--no-line-numbers" => options.line_numbers = Some(false),
            "--spans" => options.dump_spans = true,
            "--list" => options.list = true,
            "-" => options.file = Some(PathBuf::from("-")),
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option: {}", flag)));
            }
            path => {
                if options.file.is_some() {
                    return Err(CliError::Usage("only one input file is supported".to_string()));
                }
                options.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Action::Run(options))
}

fn print_usage() {
    println!("linetint {} - line-oriented syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: linetint [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or standard input) and writes it highlighted.");
    println!();
    println!("Options:");
    println!("  -l, --lang NAME        Highlight as NAME instead of guessing from FILE");
    println!("  -t, --theme PATH       Load styles from a TOML theme file");
    println!("      --languages DIR    Load extra TOML language definitions from DIR");
    println!("  -n, --line-numbers     Show line numbers");
    println!("      --no-line-numbers  Hide line numbers");
    println!("  -w, --width N          Truncate lines to N columns (0 = off)");
    println!("      --tab-width N      Expand tabs to N columns");
    println!("      --spans            Print raw spans and line states");
    println!("      --list             List available languages");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!();
    println!("Settings are read from ~/.linetint.conf; LINETINT_LOG sets the log filter.");
}
