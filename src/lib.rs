//! # attest
//!
//! Minimal assertions for Rust tests: equality, error matching, and boolean
//! checks.
//!
//! Each assertion takes a reporter, an actual value, and zero or more
//! expected values, and reports a readable diagnostic when nothing matches.
//! It replaces verbose manual comparison and branching inline in test
//! functions; it is not a mocking framework, a test runner, or a fluent
//! matcher DSL.
//!
//! ## Quick Start
//!
//! ```rust
//! use attest::{equal, err, is_true, Panicker, Want};
//!
//! let mut t = Panicker;
//!
//! equal!(t, 2 * 21, 42);
//! equal!(t, "hello".to_string(), "hello");
//! equal!(t, 6 * 7, 21, 42, 84); // passes when any expectation matches
//!
//! let parsed: Result<i32, _> = "42".parse::<i32>();
//! err!(t, parsed, Want::Nil); // expect no error
//!
//! let bad: Result<i32, _> = "x".parse::<i32>();
//! err!(t, bad, "invalid digit"); // expect a message substring
//!
//! is_true!(t, 42 > 11);
//! ```
//!
//! ## Custom reporters
//!
//! [`Panicker`] adapts failures to Rust's test harness by panicking.
//! [`Recorder`] captures the failure, its message, and whether it was fatal,
//! for inspecting assertion behavior itself:
//!
//! ```rust
//! use attest::{equal, Recorder};
//!
//! let mut r = Recorder::new();
//! equal!(r, 42, 11, 12, 13);
//! assert_eq!(r.message, "want any of the [11 12 13], got 42");
//! ```
//!
//! ## Your own types
//!
//! Implement [`ToValue`] with [`Value::record`] for structural comparison, or
//! implement [`Equiv`] and use [`Value::custom`] when the type defines its
//! own notion of equality (compared fields only; everything else ignored).

pub mod assert;
pub mod equal;
pub mod error;
pub mod report;
pub mod value;

mod format;

// Assertion entry points (the `equal!`, `err!`, and `is_true!` macros expand
// to these).
pub use assert::{equal_values, err_matches, is_true};

// Comparison engines
pub use equal::{equal, equal_any};
pub use error::{Caught, IntoWant, ToError, Want};

// Value boundary
pub use value::{Equiv, Kind, ToValue, Value};

// Reporting
pub use report::{Panicker, Recorder, Reporter, Strict};
