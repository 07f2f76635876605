use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub(crate) fn default_log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// `RUST_LOG` directives override the level chosen by the `debug` input.
pub(crate) fn init_tracing(debug: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_log_level(debug).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::default_log_level;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn unit_default_log_level_follows_debug_input() {
        assert_eq!(default_log_level(false), LevelFilter::INFO);
        assert_eq!(default_log_level(true), LevelFilter::DEBUG);
    }
}
