//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::any::Any;
use std::panic::PanicHookInfo;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let report = crash_report(
        thread.name().unwrap_or("<unnamed>"),
        info.location().map(|l| l.to_string()).as_deref(),
        panic_message(info.payload()),
        &Backtrace::new(),
    );

    // 1. stderr is always available
    eprintln!("{}", report);

    // 2. tracing may already be torn down
    tracing::error!("{}", report);

    // 3. Crash dump file
    let dump_filename = format!(
        "icon_gallery_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let dump_path = std::env::temp_dir().join(&dump_filename);

    match std::fs::write(&dump_path, &report) {
        Ok(()) => eprintln!("Crash report written to {}", dump_path.display()),
        Err(e) => eprintln!("Failed to write crash dump: {}", e),
    }
}

/// Text of a panic payload (`&str` or `String`)
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

fn crash_report(thread: &str, location: Option<&str>, message: &str, backtrace: &Backtrace) -> String {
    format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{:?}",
        Local::now().to_rfc3339(),
        thread,
        location.unwrap_or("<unknown>"),
        message,
        backtrace
    )
}
