/// Conditional logging for development builds
///
/// The `log!` macro writes informational messages to the console and is
/// compiled out of release builds unless the `console_logging` feature is
/// enabled. Warnings and errors go through `leptos::logging::warn!` and
/// `leptos::logging::error!` directly and are always kept.
///
/// # Examples
///
/// ```rust
/// use road_visualiser::log;
///
/// let url = "visualiser.cgi?data=junctions";
/// log!("Requesting {}", url);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            leptos::logging::log!($($arg),+);
        }
    };
}

pub use log;
