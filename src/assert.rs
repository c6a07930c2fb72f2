//! The assertion facade.
//!
//! Three entry points, each a single request/response against the
//! [`Reporter`]: equality ([`equal_values`] / [`equal!`]), error matching
//! ([`err_matches`] / [`err!`]), and a plain boolean check ([`is_true`] /
//! [`is_true!`]). The macros provide the flat variadic argument lists; they
//! expand to the functions below through [`ToValue`](crate::ToValue) and
//! [`IntoWant`](crate::IntoWant).
//!
//! Fatality rules: a comparison mismatch is always non-fatal so later
//! assertions in the same test still run. Calling the equality assertion with
//! zero wants is a usage error and fatal. In error assertions only the
//! "expected no error, got one" case is fatal.

use crate::equal::equal_any;
use crate::error::{match_error, Outcome, ToError, Want};
use crate::report::Reporter;
use crate::value::Value;

/// Assert that `got` equals any of `wants`.
///
/// Prefer the [`equal!`] macro, which converts its arguments for you.
/// Zero wants is a usage error and reported fatally as `no wants given`.
pub fn equal_values<R: Reporter>(mut r: R, got: Value, wants: Vec<Value>) {
    if wants.is_empty() {
        r.fail_now("no wants given");
        return;
    }
    if equal_any(&got, &wants) {
        return;
    }
    let msg = if let [want] = wants.as_slice() {
        format!("want {want}, got {got}")
    } else {
        let list: Vec<String> = wants.iter().map(ToString::to_string).collect();
        format!("want any of the [{}], got {got}", list.join(" "))
    };
    r.fail(&msg);
}

/// Assert that an actual error (or its absence) satisfies any of `wants`.
///
/// Prefer the [`err!`] macro. With zero wants this asserts that an error is
/// present.
pub fn err_matches<R: Reporter>(mut r: R, actual: impl ToError, wants: Vec<Want>) {
    match match_error(actual.to_error(), &wants) {
        Outcome::Pass => {}
        Outcome::Fail(msg) => r.fail(&msg),
        Outcome::Fatal(msg) => r.fail_now(&msg),
    }
}

/// Assert that a pre-evaluated boolean expression is true.
///
/// Reports the fixed message `not true` on failure; never fatal.
pub fn is_true<R: Reporter>(mut r: R, cond: bool) {
    if !cond {
        r.fail("not true");
    }
}

/// Assert that an actual value equals any of the expected values.
///
/// Arguments convert through [`ToValue`](crate::ToValue). With several
/// expectations the assertion passes when any one matches and the failure
/// diagnostic enumerates all of them in call order.
///
/// # Example
///
/// ```rust
/// use attest::{equal, Recorder};
///
/// let mut r = Recorder::new();
/// equal!(r, 2 * 21, 42);
/// assert!(!r.failed);
///
/// equal!(r, 42, 11, 12, 13);
/// assert_eq!(r.message, "want any of the [11 12 13], got 42");
/// ```
#[macro_export]
macro_rules! equal {
    ($r:expr, $got:expr $(, $want:expr)* $(,)?) => {
        $crate::equal_values(
            &mut $r,
            $crate::ToValue::to_value(&$got),
            ::std::vec![$($crate::ToValue::to_value(&$want)),*],
        )
    };
}

/// Assert that an error satisfies any of the expectations.
///
/// The actual argument is a `Result` or `Option` holding the error;
/// expectations are strings (substring match), [`Want::err`] values,
/// [`Want::of_type`] descriptors, or [`Want::Nil`]. With no expectations the
/// assertion requires that an error is present.
///
/// # Example
///
/// ```rust
/// use attest::{err, Recorder, Want};
///
/// let mut r = Recorder::new();
/// let res: Result<(), std::io::Error> = Ok(());
/// err!(r, res, Want::Nil);
/// assert!(!r.failed);
/// ```
#[macro_export]
macro_rules! err {
    ($r:expr, $actual:expr $(, $want:expr)* $(,)?) => {
        $crate::err_matches(
            &mut $r,
            $actual,
            ::std::vec![$($crate::IntoWant::into_want($want)),*],
        )
    };
}

/// Assert that a boolean expression is true.
///
/// # Example
///
/// ```rust
/// use attest::{is_true, Recorder};
///
/// let mut r = Recorder::new();
/// is_true!(r, 1 + 1 == 2);
/// assert!(!r.failed);
/// ```
#[macro_export]
macro_rules! is_true {
    ($r:expr, $cond:expr $(,)?) => {
        $crate::is_true(&mut $r, $cond)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Recorder, Want};

    #[test]
    fn equality_mismatch_is_non_fatal() {
        let mut r = Recorder::new();
        equal!(r, 42, 84);
        assert!(r.failed);
        assert!(!r.fatal);
        assert_eq!(r.message, "want 84, got 42");
    }

    #[test]
    fn zero_wants_is_a_fatal_usage_error() {
        let mut r = Recorder::new();
        equal!(r, 42);
        assert!(r.failed);
        assert!(r.fatal);
        assert_eq!(r.message, "no wants given");
    }

    #[test]
    fn unexpected_error_is_fatal() {
        let mut r = Recorder::new();
        let res: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "oops"));
        err!(r, res, Want::Nil);
        assert!(r.failed);
        assert!(r.fatal);
        assert_eq!(r.message, "unexpected error: oops");
    }

    #[test]
    fn error_mismatch_is_non_fatal() {
        let mut r = Recorder::new();
        let res: Result<(), std::io::Error> = Ok(());
        err!(r, res, "oops");
        assert!(r.failed);
        assert!(!r.fatal);
        assert_eq!(r.message, "want error, got <nil>");
    }

    #[test]
    fn boolean_failure_is_non_fatal() {
        let mut r = Recorder::new();
        is_true!(r, false);
        assert!(r.failed);
        assert!(!r.fatal);
        assert_eq!(r.message, "not true");
    }

    #[test]
    fn passing_assertions_do_not_report() {
        let mut r = Recorder::new();
        equal!(r, 42, 42);
        is_true!(r, true);
        let res: Result<(), std::io::Error> = Ok(());
        err!(r, res, Want::Nil);
        assert!(!r.failed);
    }
}
