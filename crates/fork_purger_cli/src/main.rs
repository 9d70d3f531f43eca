use clap::Parser;
use fork_purger_cli::{
    args::Cli,
    output::{banner, heading, render_report},
    settings::{execute, exit_code, Settings, EXIT_ERROR},
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV_VAR: &str = "FORK_PURGER_LOG";

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn report_error(err: anyhow::Error, debug: bool) {
    if debug {
        eprintln!("Error: {err:?}");
    } else {
        eprintln!("Error: {err}");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;
    init_logging(debug);

    print!("{}", banner());

    let settings = match Settings::from_cli(cli) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Failed to resolve settings");
            report_error(e.into(), debug);
            std::process::exit(EXIT_ERROR);
        }
    };

    print!("{}", heading(settings.mode));

    let result = execute(&settings).await;
    let code = exit_code(&result);

    match result {
        Ok(report) => print!("{}", render_report(&report)),
        Err(e) => report_error(e.into(), debug),
    }

    std::process::exit(code);
}
