use std::path::Path;

use tracing::info;

use crate::browser::session::BrowserSession;
use crate::cli::config::{AppConfig, build_discovery_config};
use crate::discovery::orchestrator::{discover, discover_traced};
use crate::report::console::format_console_summary;
use crate::report::record::{FormRecord, save_record};
use crate::trace::logger::TraceLogger;

/// Options of the `discover` subcommand after parsing.
#[derive(Debug, Clone, Default)]
pub struct DiscoverArgs {
    pub url: String,
    pub max_iterations: Option<u32>,
    pub option_cap: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<String>,
    pub trace: Option<String>,
    pub no_save: bool,
}

// ============================================================================
// discover subcommand
// ============================================================================

pub fn cmd_discover(args: &DiscoverArgs, app: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_discovery_config(
        &app.discovery,
        args.max_iterations,
        args.option_cap,
        args.timeout_secs,
    );

    let mut session = BrowserSession::launch(&app.browser.server_script, app.browser.settle_ms)?;

    info!(
        url = %args.url,
        max_iterations = config.max_iterations,
        option_cap = config.option_cardinality_cap,
        "discovering form inputs"
    );

    session.navigate(&args.url)?;
    session.wait_idle(app.browser.settle_ms)?;

    let outcome = match &args.trace {
        Some(path) => discover_traced(&mut session, &config, &TraceLogger::new(path))?,
        None => discover(&mut session, &config)?,
    };

    let page = session.page_info()?;
    session.quit()?;

    print!("{}", format_console_summary(&outcome));

    if !args.no_save {
        let dir = args.output_dir.as_deref().unwrap_or(&app.output.dir);
        let record = FormRecord::new(&args.url, &page.url, &page.title, outcome);
        let path = save_record(&record, Path::new(dir))?;
        println!("Saved record to {}", path.display());
    }

    Ok(())
}
