use blockstm::{HealthFlags, StmConfig, Transpiler};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Transpile(blockstm::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Transpile(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<blockstm::Error> for CliError {
    fn from(value: blockstm::Error) -> Self {
        Self::Transpile(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Generate,
    Check,
    Merge,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    color: Option<String>,
    font: Option<String>,
    config: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct CheckOut<'a> {
    flags: &'a HealthFlags,
    notice: Option<&'static str>,
}

fn usage() -> &'static str {
    "blockstm-cli\n\
\n\
USAGE:\n\
  blockstm-cli [generate] [--color <c>] [--font <family>] [--config <path>] [--out <path>] [-v] [<path>|-]\n\
  blockstm-cli check [--pretty] [-v] [<path>|-]\n\
  blockstm-cli merge [--pretty] [-v] <dir>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - generate prints PlantUML text to stdout by default; use --out to write a file.\n\
  - --config reads a JSON object merged over the defaults; --color and --font win over it.\n\
  - check prints the model's health flags and the notice it would produce as JSON.\n\
  - merge combines the single JSON document in each subdirectory of <dir> into one object.\n\
  - Diagnostics go to stderr; RUST_LOG overrides the level chosen by -v.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "generate" => args.command = Command::Generate,
            "check" => args.command = Command::Check,
            "merge" => args.command = Command::Merge,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--color" => args.color = Some(next_value(&mut it)?),
            "--font" => args.font = Some(next_value(&mut it)?),
            "--config" => args.config = Some(next_value(&mut it)?),
            "--out" => args.out = Some(next_value(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command == Command::Merge && matches!(args.input.as_deref(), None | Some("-")) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_config(args: &Args) -> Result<StmConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => StmConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => StmConfig::empty_object(),
    };
    if let Some(color) = &args.color {
        config.set_value("highlight.color", Value::String(color.clone()));
    }
    if let Some(font) = &args.font {
        config.set_value("font.family", Value::String(font.clone()));
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Generate => {
            let transpiler = Transpiler::new().with_site_config(build_config(&args)?);
            let text = read_input(args.input.as_deref())?;
            let diagram = transpiler.transpile_str(&text)?;
            tracing::info!(bytes = diagram.len(), "diagram generated");
            write_text(&diagram, args.out.as_deref())
        }
        Command::Check => {
            let text = read_input(args.input.as_deref())?;
            let data: Value = serde_json::from_str(&text)?;
            let flags = Transpiler::new().check(&data)?;
            let out = CheckOut {
                flags: &flags,
                notice: flags.first_violation().map(|n| n.alias()),
            };
            write_json(&out, args.pretty)
        }
        Command::Merge => {
            let Some(dir) = args.input.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let merged = blockstm::tasks::merge_task_documents(Path::new(dir))?;
            write_json(&merged, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        tracing::error!(error = %err, "command failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("blockstm-cli")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn generate_is_the_default_command() {
        let args = parse_args(&argv(&["model.json"])).unwrap();
        assert_eq!(args.command, Command::Generate);
        assert_eq!(args.input.as_deref(), Some("model.json"));
    }

    #[test]
    fn options_take_values() {
        let args = parse_args(&argv(&[
            "generate", "--color", "red", "--font", "Mono", "--out", "x.puml", "-",
        ]))
        .unwrap();
        assert_eq!(args.color.as_deref(), Some("red"));
        assert_eq!(args.font.as_deref(), Some("Mono"));
        assert_eq!(args.out.as_deref(), Some("x.puml"));
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn missing_option_value_is_a_usage_error() {
        assert!(matches!(
            parse_args(&argv(&["--color"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn unknown_flags_and_extra_paths_are_rejected() {
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn merge_requires_a_directory() {
        assert!(matches!(
            parse_args(&argv(&["merge"])),
            Err(CliError::Usage(_))
        ));
        let args = parse_args(&argv(&["merge", "--pretty", "tasks"])).unwrap();
        assert_eq!(args.command, Command::Merge);
        assert!(args.pretty);
    }

    #[test]
    fn flags_override_config_values() {
        let args = parse_args(&argv(&["--color", "green"])).unwrap();
        let config = build_config(&args).unwrap();
        let transpiler = Transpiler::new().with_site_config(config);
        assert_eq!(transpiler.config().highlight_color(), "green");
        assert_eq!(transpiler.config().font_family(), "Noto Sans JP");
    }

    #[test]
    fn font_with_a_quote_is_rejected() {
        let args = parse_args(&argv(&["--font", "Noto\" Sans"])).unwrap();
        assert!(matches!(
            build_config(&args),
            Err(CliError::Transpile(blockstm::Error::Config { .. }))
        ));
    }
}
