use env_logger::{Builder, Target};
use log::LevelFilter;

/// Logs go to stdout next to the rendered responses. `RUST_LOG` overrides the
/// default `info` level.
pub fn initialize_logger() {
    let mut builder = Builder::new();
    builder.target(Target::Stdout);
    builder.filter_level(LevelFilter::Info);
    builder.filter_module("isahc", LevelFilter::Warn);
    builder.parse_env("RUST_LOG");
    builder.init();
}
