//! Terminal logging with colored module prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("store"; "loaded {} destinations", count);
//! debug!("storage"; "`{}` missing, using defaults", key);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Global verbose flag (set by `--verbose`)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when `--verbose` is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Goes to stderr so command output on stdout stays machine-readable.
/// Automatically truncates long single-line messages to fit terminal width.
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let width = get_terminal_width() as usize;

    let is_tty = stderr().is_terminal();
    let mut out = stderr().lock();
    write_line(&mut out, is_tty, &prefix, module.len(), message, width);
}

fn write_line(
    out: &mut impl Write,
    is_tty: bool,
    prefix: &ColoredString,
    module_len: usize,
    message: &str,
    width: usize,
) {
    if is_tty {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }

    if message.contains('\n') {
        writeln!(out, "{prefix} {message}").ok();
    } else {
        let max_msg_len = width.saturating_sub(calc_prefix_len(module_len));
        writeln!(out, "{prefix} {}", truncate_str(message, max_msg_len)).ok();
    }

    out.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "store" | "storage" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        assert_eq!(calc_prefix_len(0), 3);
        assert_eq!(calc_prefix_len(5), 8); // "[serve] "
        assert_eq!(calc_prefix_len(7), 10); // "[storage] "
    }

    #[test]
    fn test_truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("", 0), "");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "©" is 2 bytes; cutting inside it must back off to the boundary
        let s = "© 2024 TourWithMe";
        assert_eq!(truncate_str(s, 1), "");
        assert_eq!(truncate_str(s, 2), "©");
        assert_eq!(truncate_str(s, 3), "© ");
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("serve", "serve").to_string(), "[serve]");
        assert_eq!(colorize_prefix("Store", "store").to_string(), "[Store]");
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        colored::control::set_override(false);
        let prefix = colorize_prefix("store", "store");

        let mut out = Vec::new();
        write_line(&mut out, false, &prefix, 5, "settings updated for the whole site", 24);
        assert_eq!(String::from_utf8(out).unwrap(), "[store] settings updated\n");

        let mut out = Vec::new();
        write_line(&mut out, false, &prefix, 5, "a\nb", 24);
        assert_eq!(String::from_utf8(out).unwrap(), "[store] a\nb\n");
    }

    #[test]
    fn test_terminal_output_clears_line_first() {
        colored::control::set_override(false);
        let prefix = colorize_prefix("serve", "serve");

        let mut out = Vec::new();
        write_line(&mut out, true, &prefix, 5, "up", 80);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\x1b'));
        assert!(text.ends_with("[serve] up\n"));
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
