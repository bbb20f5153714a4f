use env_logger::{Builder, Env};

fn init_logger() {
    // RUST_LOG overrides; by default only warnings (failed formatter runs,
    // skipped entries) are shown next to the report lines.
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn main() {
    init_logger();
    snapregen::cli::run();
}
