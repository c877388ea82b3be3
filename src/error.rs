//! Error types for keyboard layout resolution

use thiserror::Error;

/// Failures surfaced to the consumer.
///
/// Only initialization can fail; every other condition (missing layout data,
/// pending dead keys, unresolvable callbacks) degrades to an empty or absent
/// value instead of an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open X11 display")]
    DisplayUnavailable,

    #[error("Failed to open X11 input method")]
    InputMethodUnavailable,

    #[error("X11 input method supports no usable input style")]
    UnsupportedInputStyle,
}

pub type Result<T> = std::result::Result<T, Error>;
