//! Failure reporting.
//!
//! Assertions never panic directly; they hand a finished diagnostic to a
//! [`Reporter`], which decides what a failure means for the surrounding test.
//! [`Panicker`] is the adapter for Rust's built-in test harness; [`Recorder`]
//! captures failures for inspection, which is how this crate tests itself and
//! how you can test a custom reporter; [`Strict`] wraps any reporter and
//! promotes every failure to fatal.

/// Consumes assertion failures.
///
/// `fail` records a failure the test can continue past; `fail_now` records a
/// failure that must abort the current test. Each assertion call reports at
/// most one failure.
pub trait Reporter {
    /// Record a non-fatal failure; the calling test keeps running.
    fn fail(&mut self, msg: &str);

    /// Record a fatal failure; the calling test must not continue.
    fn fail_now(&mut self, msg: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn fail(&mut self, msg: &str) {
        (**self).fail(msg);
    }

    fn fail_now(&mut self, msg: &str) {
        (**self).fail_now(msg);
    }
}

/// A reporter that records failures instead of acting on them.
///
/// Queryable afterwards for whether a failure occurred, whether it was fatal,
/// and the exact diagnostic. Holds only the most recent message.
///
/// # Example
///
/// ```rust
/// use attest::{equal, Recorder};
///
/// let mut r = Recorder::new();
/// equal!(r, 42, 84);
/// assert!(r.failed);
/// assert!(!r.fatal);
/// assert_eq!(r.message, "want 84, got 42");
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    pub failed: bool,
    pub fatal: bool,
    pub message: String,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for Recorder {
    fn fail(&mut self, msg: &str) {
        self.failed = true;
        self.message = msg.to_owned();
    }

    fn fail_now(&mut self, msg: &str) {
        self.fatal = true;
        self.fail(msg);
    }
}

/// The adapter for Rust's built-in test harness.
///
/// libtest has no non-fatal failure channel, so both methods panic with the
/// diagnostic; the fatal/non-fatal distinction is observable only through a
/// recording reporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Panicker;

impl Reporter for Panicker {
    fn fail(&mut self, msg: &str) {
        panic!("assertion failed: {msg}");
    }

    fn fail_now(&mut self, msg: &str) {
        panic!("assertion failed: {msg}");
    }
}

/// Wraps another reporter and promotes every failure to fatal.
///
/// Use it when a test should stop at its first failed assertion instead of
/// accumulating mismatches.
///
/// # Example
///
/// ```rust
/// use attest::{equal, Recorder, Strict};
///
/// let mut r = Strict(Recorder::new());
/// equal!(r, 42, 84);
/// assert!(r.0.fatal);
/// ```
#[derive(Debug, Default)]
pub struct Strict<R>(pub R);

impl<R: Reporter> Reporter for Strict<R> {
    fn fail(&mut self, msg: &str) {
        self.0.fail_now(msg);
    }

    fn fail_now(&mut self, msg: &str) {
        self.0.fail_now(msg);
    }
}
