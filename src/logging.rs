use std::io::Write;

use env_logger::{Builder, Env};

/// Install the `<timestamp> - <LEVEL> - <message>` logger, filtered by
/// `RUST_LOG` (default `info`). Later calls are no-ops.
pub fn init(is_test: bool) {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .is_test(is_test)
        .try_init();
}
