use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

const LOG_TARGETS: [&str; 3] = ["g80_layouts", "layout_search_client", "utils"];

/// Warnings only by default; `debug` turns on the per-request diagnostics.
pub fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init(debug: bool) -> Result<(), log::SetLoggerError> {
    let mut builder = ConfigBuilder::new();
    for target in LOG_TARGETS {
        builder.add_filter_allow_str(target);
    }
    TermLogger::init(
        level(debug),
        builder.build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
