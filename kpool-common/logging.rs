use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
#[path = "./logging.tests.rs"]
mod logging_tests;

/// Returns log level for the workspace crates that matches the requested `verbosity`.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Builds default filter directives for the application and all its library crates.
pub fn default_directives(app_name: &str, verbosity: u8) -> String {
    let level = level_for(verbosity);
    format!("warn,{app_name}={level},{app_name}_common={level},{app_name}_config={level},{app_name}_kube={level}")
}

/// Initializes logging to stderr and returns worker guard that will flush logs on drop.\
/// **Note** that `RUST_LOG` environment variable takes precedence over `verbosity`.
pub fn initialize(app_name: &str, verbosity: u8) -> Result<WorkerGuard> {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let timer = time::format_description::parse("[year]-[month padding:zero]-[day padding:zero] [hour]:[minute]:[second]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(time_offset, timer);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(app_name, verbosity)));

    #[cfg(debug_assertions)]
    let stderr_subscriber = tracing_subscriber::fmt::layer()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_timer(timer)
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    #[cfg(not(debug_assertions))]
    let stderr_subscriber = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(timer)
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(stderr_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}
