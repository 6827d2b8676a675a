//! Browser console logging.

/// Route `log` records at `level` and above to the browser console and
/// install the panic hook.
///
/// # Errors
///
/// Returns `Err` if a logger was already installed.
pub fn init(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)
}
