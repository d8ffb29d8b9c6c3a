use clap::Parser;
use es_metrics::cli::{self, Cli};
use es_metrics::config::Config;
use es_metrics::errors::MetricsError;
use es_metrics::observability;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(cli::report_parse_error(&e)),
    };

    let config = match Config::from_env()
        .map_err(MetricsError::from)
        .and_then(|config| cli.apply(config))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    observability::init(config.log_format, cli.verbose);
    debug!(target: "es.cli", base_url = %config.base_url(), scope = %cli.scope, metric = %cli.metric, "Collecting metric");

    match es_metrics::collect_metric(&config, &cli.scope, &cli.metric).await {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
