//! Diagnostic output
//!
//! Printed through `esp-println` when the `esp32-log` feature is enabled,
//! otherwise the arguments are only type-checked.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}
