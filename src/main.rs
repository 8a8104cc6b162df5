use clap::{Parser, ValueEnum};
use console::{Term, set_colors_enabled, style};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use pinglog::{
    CsvSink, IcmpProbe, PinglogError, RunConfig, Sampler, SystemPingProbe, Target, TargetRegistry,
    fmt,
};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pinglog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Continuous network latency sampler - probe hosts, append RTT records to CSV")]
#[command(long_about = Some(
    "Probe a fixed set of hosts once per sweep and append one timestamped\n\
     CSV record per probe to <results-dir>/<BASENAME>_<start>.csv.\n\
     \n\
     Examples:\n\
       pinglog lounge --duration 300 --gap 1\n\
       pinglog dns --duration 60 --gap 0.5 --target dns=8.8.8.8\n\
       pinglog home --duration 600 --gap 2 --system-ping\n\
     \n\
     Durations and gaps are expressed in seconds."
))]
struct Args {
    /// Base name of the output file (<results-dir>/<BASENAME>_<start>.csv)
    #[arg(index = 1)]
    basename: String,

    /// Total run duration in seconds
    #[arg(short = 'd', long)]
    duration: f64,

    /// Gap between sweeps in seconds
    #[arg(short = 'g', long)]
    gap: f64,

    /// Target to probe, as label=address (repeatable, probed in order)
    #[arg(short = 't', long = "target")]
    targets: Vec<String>,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    timeout: f64,

    /// Directory for output files
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Probe via the system ping utility instead of raw ICMP sockets
    #[arg(long)]
    system_ping: bool,

    /// Output format for the end-of-run summary: text or json
    #[arg(short = 'f', long, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Alias for JSON summary output
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty-print JSON
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Disable colored output
    #[arg(long = "no-color", alias = "nocolor")]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let mut args = Args::parse();

    // alias --json
    if args.json {
        args.format = OutputFormat::Json;
    }

    let want_color = matches!(args.format, OutputFormat::Text)
        && io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && !args.no_color;
    set_colors_enabled(want_color);

    let term = Term::stdout();
    let exit_code = match run(args, &term).await {
        Ok(()) => 0,
        Err(e) => handle_error(&term, e),
    };
    process::exit(exit_code);
}

async fn run(args: Args, term: &Term) -> Result<(), PinglogError> {
    let config = RunConfig::from_seconds(
        args.basename,
        args.results_dir,
        args.duration,
        args.gap,
        args.timeout,
    )?;
    let registry = if args.targets.is_empty() {
        TargetRegistry::default_pair()
    } else {
        let targets = args
            .targets
            .iter()
            .map(|spec| Target::parse_spec(spec))
            .collect::<Result<Vec<_>, _>>()?;
        TargetRegistry::new(targets)?
    };

    let started = chrono::Local::now();
    let sink = CsvSink::create(&config.results_dir, &config.basename, started)?;

    term.write_line(&format!(
        "{} {:.0} second/s, gap {:.1} second/s",
        style("Running for:").cyan().bold(),
        config.duration.as_secs_f64(),
        config.gap.as_secs_f64()
    ))
    .ok();
    term.write_line(&format!(
        "{} {}",
        style("Writing to:").cyan().bold(),
        sink.path().display()
    ))
    .ok();

    let timeout = config.timeout;
    let summary = if args.system_ping {
        Sampler::new(
            config,
            registry,
            SystemPingProbe::new(timeout),
            sink,
            term.clone(),
        )
        .run()
        .await?
    } else {
        Sampler::new(
            config,
            registry,
            IcmpProbe::new(timeout),
            sink,
            term.clone(),
        )
        .run()
        .await?
    };

    match args.format {
        OutputFormat::Json => match fmt::json::summary_to_json(&summary, args.pretty) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serializing: {}", e),
        },
        OutputFormat::Text => {
            term.write_line(&fmt::text::render_summary(&summary)).ok();
        }
    }
    Ok(())
}

fn handle_error(term: &Term, err: PinglogError) -> i32 {
    term.write_line(&style(format!("Error: {}", err)).red().to_string())
        .ok();
    match err {
        PinglogError::Config(_) => 2,
        _ => 1,
    }
}
