use tracing::Level;

/// Map the repeatable `-v` count onto a log level: 0 = WARN, 1 = INFO, 2+ = DEBUG.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init_logging(verbosity: u8, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level_for_verbosity(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr);

    // try_init fails only when a subscriber is already installed
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
