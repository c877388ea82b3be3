//! Platform backends
//!
//! Exactly one resolver is compiled per target OS; there is no runtime
//! branching on platform.

#[cfg(target_os = "linux")]
mod x11;
#[cfg(target_os = "linux")]
pub use self::x11::X11Resolver as NativeResolver;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use self::macos::MacResolver as NativeResolver;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use self::windows::WinResolver as NativeResolver;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
compile_error!("keyboard-layout supports Linux (X11), macOS, and Windows targets");

/// Starts OS layout-change delivery into the listener registry.
///
/// macOS and Windows register with their notification mechanisms here; X11
/// offers no push notification in this design, so layout changes on Linux
/// are observed only when the consumer re-queries (a documented platform
/// limitation, not a bug).
pub fn register_layout_observer() {
    #[cfg(target_os = "macos")]
    macos::register_layout_observer();

    #[cfg(target_os = "windows")]
    windows::register_layout_observer();
}
