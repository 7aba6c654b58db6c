//! System color-scheme preference lookup.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

type SystemDetector = fn() -> bool;

static SYSTEM_DETECTOR: Lazy<Mutex<SystemDetector>> = Lazy::new(|| Mutex::new(os_detector));

/// Overrides the detector used to answer "does the system prefer dark?".
///
/// This is useful for testing or when you want to force a specific answer.
pub fn set_system_detector(detector: SystemDetector) {
    let mut guard = SYSTEM_DETECTOR.lock().unwrap();
    *guard = detector;
}

/// Whether the operating environment reports a preference for dark.
///
/// Queried once per startup decision, not subscribed to for live changes.
/// When the host cannot answer, the result is `false`: light is the
/// explicit default, not an accidental one.
pub fn system_prefers_dark() -> bool {
    let detector = SYSTEM_DETECTOR.lock().unwrap();
    (*detector)()
}

fn os_detector() -> bool {
    match detect_os_theme() {
        OsThemeMode::Dark => true,
        OsThemeMode::Light => false,
    }
}
