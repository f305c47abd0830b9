//! Logging macros for dual-target support (defmt on embedded targets,
//! println for host-side tests).
//!
//! Format strings are restricted to `{}` and `{:?}` so the same call site
//! compiles against both backends.

/// Log at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// Log at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_display_and_debug_args() {
        log_debug!("port {} at {} Hz", 0u8, 100_000u32);
        log_info!("bus ready");
        log_warn!("retrying {:?}", Some(3));
        log_error!("transfer failed: {:?}", "nack");
    }
}
