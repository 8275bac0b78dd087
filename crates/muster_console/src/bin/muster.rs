//! Muster CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use muster_console::{Catalog, ConsoleConfig, Repl, run_batch, snapshot, standard_console};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MUSTER_LOG";

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    demo: bool,
    self_test: bool,
    stop_on_failure: bool,
    snapshot: Option<PathBuf>,
    log_filter: Option<String>,
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--demo" => config.demo = true,
            "--self-test" => config.self_test = true,
            "--stop-on-failure" => config.stop_on_failure = true,
            "--snapshot" => {
                let path = args.next().ok_or("--snapshot requires a path")?;
                config.snapshot = Some(PathBuf::from(path));
            }
            "--log" => {
                config.log_filter = Some(args.next().ok_or("--log requires a filter")?);
            }
            "-c" | "--command" => {
                config.commands.push(args.next().ok_or("-c requires a command")?);
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    if config.demo && config.snapshot.is_some() {
        return Err("--demo and --snapshot cannot be combined".into());
    }
    Ok(config)
}

fn init_logging(filter: &str, from_flag: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if from_flag {
        EnvFilter::try_new(filter)?
    } else {
        EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(filter))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if cli.show_version {
        println!("muster {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.batch_mode || !cli.commands.is_empty() || cli.self_test {
        ConsoleConfig::batch()
    } else {
        ConsoleConfig::default()
    };
    config = config.with_stop_on_failure(cli.stop_on_failure);
    if let Some(filter) = &cli.log_filter {
        config = config.with_log_filter(filter.as_str());
    }
    init_logging(&config.log_filter, cli.log_filter.is_some())?;

    let catalog = match &cli.snapshot {
        Some(path) => snapshot::load_from_file(path)?,
        None if cli.demo || cli.self_test => Catalog::demo(),
        None => Catalog::new(),
    };
    let mut console = standard_console(catalog, config)?;

    if cli.self_test {
        let report = console.run_all_tests();
        println!("{}", report.summary());
        return Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if !cli.commands.is_empty() {
        let mut failed = false;
        for command in &cli.commands {
            let reply = console.execute(command);
            if reply.is_ok() {
                println!("{}", reply.text);
            } else {
                eprintln!("{reply}");
                failed = true;
            }
        }
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    if cli.batch_mode {
        let failures = run_batch(
            &mut console,
            io::stdin().lock(),
            &mut io::stdout(),
            &mut io::stderr(),
        )?;
        return Ok(if failures == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    Repl::new(console)?.run()?;
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        "\x1b[1mMuster\x1b[0m - Record lookup console with a built-in test harness

\x1b[1mUSAGE:\x1b[0m
    muster [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -b, --batch            Read commands from stdin, one per line
    -c, --command <CMD>    Run a command and exit (repeatable)
        --demo             Start with the demo campaign catalog
        --snapshot <PATH>  Start with a catalog loaded from a snapshot
        --self-test        Run the standard test suite against the demo catalog
        --stop-on-failure  Stop test runs at the first failing test
        --log <FILTER>     Log filter, overrides {LOG_ENV} (default: warn)

\x1b[1mEXAMPLES:\x1b[0m
    muster --demo
    muster --demo -c \"show hero lord_1\"
    muster --self-test
    echo \"find hero tags=lord\" | muster --demo --batch"
    );
}
