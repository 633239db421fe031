use once_cell::sync::OnceCell;

/// Target attached to every record this crate emits
pub const LOG_TAG: &str = "ModemPort";

static LOGGER: OnceCell<()> = OnceCell::new();

/// Install an `env_logger` backend at `info` unless `RUST_LOG` says
/// otherwise. Safe to call repeatedly; a host that already installed its
/// own `log` backend keeps it.
pub fn init() {
    LOGGER.get_or_init(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        if env_logger::Builder::from_env(env).try_init().is_ok() {
            log::debug!(target: LOG_TAG, "Logger initialised");
        }
    });
}
