use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
///
/// Statement logging adds `debug` for the client crate, which logs every
/// statement it sends.
pub fn default_filter(debug: bool, log_statements: bool) -> String {
    let mut directives = vec![if debug { "debug" } else { "info" }.to_string()];
    if log_statements && !debug {
        directives.push("cratedb_client=debug".to_string());
    }
    directives.join(",")
}

pub fn init_tracing(log_format: &str, debug: bool, log_statements: bool) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(debug, log_statements)));

        let result = if log_format == "json" {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_target(false)
                .try_init()
        };
        if let Err(err) = result {
            eprintln!("failed to initialize logging: {err}");
        }
    });
}
