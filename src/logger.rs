use std::io::Write;

/// Initialize env_logger on stderr so stdout stays clean for JSON output.
/// `RUST_LOG` wins; otherwise `info`, or `debug` with `verbose`.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if let Err(e) = builder.try_init() {
        eprintln!("logger already initialized: {e}");
    }
}
