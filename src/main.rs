use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use rfa::{parse_number, render_report, render_svg, Analyzer, AnalyzerConfig, Error, PlotData};

const SYNTAX_HINT: &str =
    "hint: check the syntax of the function (use '**' or '^' for powers, e.g. (x**2 - 1)/(x - 1))";

#[derive(Parser)]
#[command(
    name = "rfa",
    version,
    about = "Domain, range, intercepts, asymptotes and holes of a rational function",
    after_help = "Examples:\n  rfa \"(x**2 - 1)/(x - 1)\"\n  rfa \"1/(x - 2)\" --at 3 --plot f.svg\n  rfa                      # interactive prompt"
)]
struct Cli {
    /// Function to analyze; omit it to read functions from stdin
    #[arg(allow_hyphen_values = true)]
    function: Option<String>,

    /// Evaluate the simplified function at this point (integer, decimal or fraction)
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    at: Option<String>,

    /// Name of the free variable
    #[arg(long, value_name = "NAME")]
    var: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write an SVG plot of the function
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let analyzer = Analyzer::new(config);

    let ok = match cli.function.as_deref() {
        Some(function) => run_once(&analyzer, function, &cli)?,
        None => interactive(&analyzer, &cli)?,
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(var) = &cli.var {
        config.variable = var.clone();
    }
    config.validate().context("invalid configuration")?;
    info!(variable = %config.variable, max_degree = config.max_degree, "configuration ready");
    Ok(config)
}

/// Analyze one function and print the report. `Ok(false)` means the input was
/// rejected.
fn run_once(analyzer: &Analyzer, function: &str, cli: &Cli) -> Result<bool> {
    let result = match analyzer.analyze(function) {
        Ok(result) => result,
        Err(err @ Error::Parse(_)) => {
            eprintln!("error: {err}");
            eprintln!("{SYNTAX_HINT}");
            return Ok(false);
        }
        Err(err) => return Err(err).context("analysis failed"),
    };

    let point = match cli.at.as_deref() {
        Some(text) => match parse_number(text) {
            Ok(value) => Some(value),
            Err(_) => {
                eprintln!("warning: the evaluation point must be a number, got '{text}'");
                None
            }
        },
        None => None,
    };
    let evaluation = point
        .as_ref()
        .map(|value| (value, analyzer.evaluate(&result.reduced, value)));

    let report = render_report(&result, evaluation.as_ref().map(|(v, e)| (*v, e)));
    print!("{report}");

    if let Some(path) = &cli.plot {
        let eval_point = evaluation.as_ref().and_then(|(value, evaluation)| {
            let x = num_traits::ToPrimitive::to_f64(*value)?;
            Some((x, evaluation.approx()?))
        });
        let plot_config = &analyzer.config().plot;
        let data = PlotData::sample(&result, eval_point, plot_config);
        render_svg(&data, path, plot_config)
            .with_context(|| format!("writing plot to {}", path.display()))?;
        println!("Plot written to {}", path.display());
    }
    Ok(true)
}

fn interactive(analyzer: &Analyzer, cli: &Cli) -> Result<bool> {
    let var = &analyzer.config().variable;
    println!("Rational function analyzer. Enter a function of {var}, or 'quit' to leave.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("f({var}) = ");
        io::stdout().flush().context("flushing stdout")?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(true);
        };
        let line = line.context("reading stdin")?;
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => return Ok(true),
            _ => {
                run_once(analyzer, input, cli)?;
                println!();
            }
        }
    }
}
