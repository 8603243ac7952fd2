use std::sync::Mutex;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

lazy_static! {
    static ref LOGGING_INITIALIZED: Mutex<bool> = Mutex::new(false);
}

/// Initialize logging.  Nothing is installed unless the environment variable
/// `RUST_LOG` is set to a non-empty value, in which case it is interpreted as
/// an `EnvFilter` (ex: `RUST_LOG=inventory_graph=trace`).  Safe to call more
/// than once; only the first call does anything.
pub fn init_logging() {
    let mut initialized = match LOGGING_INITIALIZED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if *initialized {
        return;
    }
    *initialized = true;

    // Our wrapper scripts set RUST_LOG unconditionally, frequently to an
    // empty value, and that shouldn't be read as a desire to enable logging.
    let rustlog = match std::env::var("RUST_LOG") {
        Ok(rustlog) if !rustlog.is_empty() => rustlog,
        _ => return,
    };
    let env_filter = match EnvFilter::try_new(&rustlog) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("Ignoring unparseable RUST_LOG {:?}: {}", rustlog, err);
            return;
        }
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .compact()
        // stdout carries the command's output, so logs go to stderr.
        .with_writer(std::io::stderr)
        .with_ansi(false)
        // Wall time is noise for a run that takes milliseconds.
        .without_time()
        .with_filter(env_filter);

    // A subscriber installed by an embedding application wins.
    let _ = Registry::default().with(layer).try_init();
}
