mod debug_report;

use jarida::{Context, Field, LoiVariant, Options, RegionScope, TieBreak, extract_verbose_with, read_document, write_csv};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    context: Context,
    options: Options,
    color: bool,
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).with_target(false).with_writer(io::stderr).finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn run(config: &CliConfig) -> jarida::Result<()> {
    let (label, text) = match &config.input {
        Some(path) => (path.display().to_string(), read_document(path)?),
        None => ("<stdin>".to_string(), read_stdin_input()?),
    };

    let res = extract_verbose_with(&text, &config.context, &config.options)?;

    match &config.output {
        Some(path) => {
            write_csv(&res.report, BufWriter::new(File::create(path)?))?;
            debug_report::print_run(&label, &res, config.color);
        }
        None => write_csv(&res.report, io::stdout().lock())?,
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut context = Context::default();
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut verbose = 0u8;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("jarida {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--first-wins" => options.tie_break = TieBreak::FirstWins,
            "--issue-number" => options.issue_number = true,
            "-i" | "--input" => {
                let value = take_value(&flag, inline, &mut args)?;
                set_input(&mut input, value)?;
            }
            "-o" | "--output" => output = Some(PathBuf::from(take_value(&flag, inline, &mut args)?)),
            "--year" => {
                let value = take_value(&flag, inline, &mut args)?;
                let current_year =
                    value.parse().map_err(|_| format!("error: invalid --year '{value}' (expected YYYY)"))?;
                context = Context { current_year };
            }
            "--loi" => {
                options.loi = match take_value(&flag, inline, &mut args)?.as_str() {
                    "strict" => LoiVariant::Strict,
                    "bounded" => LoiVariant::Bounded,
                    other => return Err(format!("error: invalid --loi '{other}' (expected strict|bounded)")),
                };
            }
            "--region-scope" => {
                options.region_scope = match take_value(&flag, inline, &mut args)?.as_str() {
                    "context" => RegionScope::Context,
                    "document" => RegionScope::Document,
                    other => {
                        return Err(format!("error: invalid --region-scope '{other}' (expected context|document)"));
                    }
                };
            }
            "--threshold" => {
                let value = take_value(&flag, inline, &mut args)?;
                let (field, threshold) = parse_threshold(&value)?;
                options.thresholds.insert(field, threshold);
            }
            "--" => {
                for rest in args.by_ref() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v') => {
                verbose = verbose.saturating_add((arg.len() - 1) as u8);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => set_input(&mut input, arg)?,
        }
    }

    Ok(CliConfig { input, output, context, options, color, verbose })
}

fn take_value(flag: &str, inline: Option<String>, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    inline.or_else(|| args.next()).ok_or_else(|| format!("error: {flag} expects a value"))
}

fn set_input(input: &mut Option<PathBuf>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(PathBuf::from(value));
    Ok(())
}

fn parse_threshold(value: &str) -> Result<(Field, u8), String> {
    let invalid = || format!("error: invalid --threshold '{value}' (expected FIELD=N, N in 0..=100)");

    let (key, n) = value.split_once('=').ok_or_else(invalid)?;
    let field = Field::parse(key).ok_or_else(|| format!("error: unknown field '{key}' in --threshold"))?;
    let threshold = n.parse::<u8>().ok().filter(|n| *n <= 100).ok_or_else(invalid)?;
    Ok((field, threshold))
}

fn read_stdin_input() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    let fields = Field::ALL.iter().map(|f| f.key()).collect::<Vec<_>>().join(", ");

    format!(
        "jarida {version}

Field extraction for Moroccan official-gazette text.

Usage:
  jarida [OPTIONS] [--] <path>
  jarida [OPTIONS] --input <path>

Reads the document at <path> (stdin when omitted) and writes the report as
CSV to stdout, or to --output with a run summary on stdout.

Options:
  -i, --input <path>           Document to read.
  -o, --output <path>          Write the CSV report here.
  --year <YYYY>                Last accepted year. Default: current year.
  --loi <strict|bounded>       LOI pattern. Default: strict.
  --first-wins                 Keep the first rule's word/context at an index.
  --region-scope <context|document>
                               Where to look for localities. Default: context.
  --issue-number               Also flag the issue-number word (is_عدد).
  --threshold <FIELD=N>        Fuzzy threshold (0..=100) for a field.
                               Fields: {fields}
  --color                      Force ANSI color output.
  --no-color                   Disable ANSI color output.
  -v                           More logging on stderr (repeatable).
  -h, --help                   Show this help message.
  -V, --version                Print version information.

Exit codes:
  0  Success.
  1  Runtime error (unreadable input, bad pattern, write failure).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
