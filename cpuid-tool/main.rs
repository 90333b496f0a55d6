use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cpuid_tool::{driver, options, parse_from, LiveCpu, Parsed, RunConfig, ToolError};

fn init_logging(config: &RunConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.log_level().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let config = match parse_from(&args) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::Help) => {
            print!("{}", options::usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let e = ToolError::from(e);
            eprintln!("{}", e.message());
            return ExitCode::from(e.exit_code());
        }
    };

    init_logging(&config);
    tracing::debug!("Run configuration: {:?}", config);

    let quiet = config.quiet;
    match driver::run(config, &LiveCpu) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !quiet {
                eprintln!("{}", e.message());
            }
            ExitCode::from(e.exit_code())
        }
    }
}
