//! System text encoding and resize notification queries.

use termbridge_common::constants::FALLBACK_CODESET;

/// Name of the character encoding the system locale uses.
///
/// On Unix this is `nl_langinfo(CODESET)` under the environment's `LC_CTYPE`;
/// the caller's locale is restored afterwards. On Windows it is the ANSI
/// code page, e.g. `"CP1252"`. Falls back to `"ASCII"` when undeterminable.
#[must_use]
pub fn system_encoding() -> String {
    let name = platform_codeset().filter(|s| !s.is_empty());
    tracing::debug!(codeset = ?name, "system codeset");
    name.unwrap_or_else(|| FALLBACK_CODESET.to_string())
}

#[cfg(unix)]
fn platform_codeset() -> Option<String> {
    use std::ffi::CStr;
    use std::sync::{Mutex, PoisonError};

    static LOCALE: Mutex<()> = Mutex::new(());
    let _guard = LOCALE.lock().unwrap_or_else(PoisonError::into_inner);

    // SAFETY: setlocale with a null pointer only queries; the returned
    // string is copied before the next setlocale call can invalidate it.
    let saved = unsafe {
        let current = libc::setlocale(libc::LC_CTYPE, std::ptr::null());
        (!current.is_null()).then(|| CStr::from_ptr(current).to_owned())
    };
    // SAFETY: the empty name selects the environment's locale;
    // nl_langinfo's result is copied immediately.
    let codeset = unsafe {
        let _ = libc::setlocale(libc::LC_CTYPE, c"".as_ptr());
        let raw = libc::nl_langinfo(libc::CODESET);
        (!raw.is_null()).then(|| CStr::from_ptr(raw).to_string_lossy().into_owned())
    };
    if let Some(saved) = saved {
        // SAFETY: `saved` is a NUL-terminated copy of the previous locale name.
        let _ = unsafe { libc::setlocale(libc::LC_CTYPE, saved.as_ptr()) };
    }
    codeset
}

#[cfg(windows)]
fn platform_codeset() -> Option<String> {
    // SAFETY: GetACP has no preconditions.
    let cp = unsafe { winapi::um::winnls::GetACP() };
    Some(format!("CP{cp}"))
}

#[cfg(not(any(unix, windows)))]
const fn platform_codeset() -> Option<String> {
    None
}

/// Signal delivered to the process when its terminal is resized.
///
/// Registering a handler is left to the caller.
#[must_use]
pub const fn resize_signal() -> Option<i32> {
    #[cfg(unix)]
    {
        Some(libc::SIGWINCH)
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_never_empty() {
        assert!(!system_encoding().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn resize_signal_is_sigwinch() {
        assert_eq!(resize_signal(), Some(libc::SIGWINCH));
    }

    #[cfg(windows)]
    #[test]
    fn encoding_names_code_page() {
        assert!(system_encoding().starts_with("CP"));
    }
}
