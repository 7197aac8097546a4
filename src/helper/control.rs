//! Test control capability
//!
//! The `require_*` helpers fail the calling test instead of returning an
//! error. How a test fails is up to the harness, so they go through this
//! trait rather than panicking directly.

use std::fmt;

/// Lets helper code fail the test that called it
pub trait TestControl {
    /// Mark the caller as a helper frame so failures are attributed to its
    /// caller. Harnesses that track this do it here; the default does nothing.
    fn helper(&self) {}

    /// Fail the current test immediately with a formatted message
    fn fatal(&self, message: fmt::Arguments<'_>) -> !;
}

/// [`TestControl`] for the standard libtest harness: failing panics
///
/// Use together with `#[track_caller]` callers so the panic location is the
/// test body.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicControl;

impl TestControl for PanicControl {
    #[track_caller]
    fn fatal(&self, message: fmt::Arguments<'_>) -> ! {
        panic!("{}", message)
    }
}

impl<T: TestControl + ?Sized> TestControl for &T {
    fn helper(&self) {
        (**self).helper()
    }

    #[track_caller]
    fn fatal(&self, message: fmt::Arguments<'_>) -> ! {
        (**self).fatal(message)
    }
}
