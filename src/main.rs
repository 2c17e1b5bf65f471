use clap::Parser;
use tracing_subscriber::EnvFilter;

use form_discovery::cli::commands::{DiscoverArgs, cmd_discover};
use form_discovery::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Discover {
            url,
            max_iterations,
            option_cap,
            timeout_secs,
            output_dir,
            trace,
            no_save,
        } => {
            let args = DiscoverArgs {
                url,
                max_iterations,
                option_cap,
                timeout_secs,
                output_dir,
                trace,
                no_save,
            };
            cmd_discover(&args, &config)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` raises the default `warn` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
