use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn, Level};

use linker::{Config, Error};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

const EXAMPLES: &str = "\
Examples:
  linker input.txt output.txt       save output without printing
  linker -p input.txt output.txt    print formatted output
  linker -pr input.txt output.txt   print human readable output
  linker -v input.txt output.txt    print verbose debug information
  linker input.txt                  simply print output without saving";

#[derive(Debug, Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE, after_help = EXAMPLES)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Output file; when omitted the result is printed
    output: Option<PathBuf>,

    /// Print the output even when writing to a file
    #[clap(short, long)]
    print: bool,

    /// Print human readable output
    #[clap(short = 'r', long)]
    human: bool,

    /// Print verbose debug information
    #[clap(short, long)]
    verbose: bool,

    /// Keep an existing output file and write to `name(n).ext` instead
    #[clap(short, long)]
    keep_both: bool,

    /// YAML file with default switches
    #[clap(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn switches(&self) -> Config {
        Config {
            print: self.print,
            human: self.human,
            verbose: self.verbose,
            keep_both: self.keep_both,
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn output_path(path: &Path, config: &Config) -> Result<PathBuf, Error> {
    linker::check_output(path)?;
    if !path.exists() {
        return Ok(path.to_path_buf());
    }
    if config.keep_both {
        return linker::keep_both(path);
    }
    warn!("output file \"{}\" already exists, overwriting", path.display());
    Ok(path.to_path_buf())
}

fn run(args: &Args, config: &Config) -> Result<(), Error> {
    linker::check_input(&args.input)?;
    let output = match &args.output {
        Some(path) => Some(output_path(path, config)?),
        None => None,
    };

    debug!("reading input file \"{}\"", args.input.display());
    let text = fs::read_to_string(&args.input)?;
    let linked = linker::link(&text)?;

    for warning in linked.warnings() {
        eprintln!("{}", warning.diagnostic().cformat());
    }

    if config.print || output.is_none() {
        if config.human {
            debug!("printing human readable output");
            println!("{}", linker::human_colored(&linked));
        } else {
            debug!("printing output");
            println!("{}", linker::output(&linked));
        }
        if !linked.warnings().is_empty() {
            println!("{}", linker::warning_text(linked.warnings()));
        }
    }

    if let Some(path) = output {
        debug!("writing output file \"{}\"", path.display());
        fs::write(&path, linker::file_content(&linked))?;
        info!("wrote {}", path.display());
    }

    debug!("linking process is complete, {} module(s) linked", linked.len());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err.diagnostic().cformat());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    let config = file_config.merge(args.switches());
    init_tracing(config.verbose);
    debug!("{:?}", config);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.diagnostic().cformat());
            ExitCode::FAILURE
        }
    }
}
