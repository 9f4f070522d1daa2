use admission_sim::config::{self, Args, FormatArg};
use admission_sim::engine;
use admission_sim::error::Result;
use admission_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = config::parse_args()?;
    init_tracing(&args);

    let config = config::build_config(&args)?;
    let result = engine::run_simulation(&config)?;

    let formatter = formatter_for(&args.format);
    let output = formatter.write(&result)?;
    print!("{}", output);

    Ok(())
}

fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "warn,admission_sim=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
