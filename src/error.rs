//! The error matcher.
//!
//! Matches a caught error against a heterogeneous list of expectations
//! ([`Want`]): a nil-marker, an error value (including anything it
//! transitively wraps), a message substring, or a concrete error type. The
//! actual error arrives through [`ToError`], which accepts `Result<T, E>` and
//! `Option<E>` for any `E` convertible to [`anyhow::Error`] — including
//! `anyhow::Error` itself — and normalizes them to "was an error caught, and
//! which one".
//!
//! With zero wants the implicit expectation is "any error". A nil-marker want
//! meeting a real error is the one fatal case: an unexpected error aborts the
//! test instead of letting it run on.

use std::any;
use std::error::Error as StdError;
use std::fmt;

use crate::format::short_name;
use crate::value::{Kind, ToValue, Value};

/// An error caught at the assertion boundary, with the concrete type name it
/// had before being erased.
pub struct Caught {
    error: anyhow::Error,
    type_name: &'static str,
}

impl Caught {
    /// The caught error itself.
    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub(crate) fn short_type(&self) -> String {
        short_name(self.type_name)
    }

    pub(crate) fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Debug for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.short_type(), self.error)
    }
}

/// Conversion of an assertion's actual-error argument.
///
/// `Ok` and `None` mean no error was caught. Pass your `Result` directly; a
/// bare error value goes through `Some(err)`.
pub trait ToError {
    fn to_error(self) -> Option<Caught>;
}

impl<E: Into<anyhow::Error>> ToError for Option<E> {
    fn to_error(self) -> Option<Caught> {
        self.map(|e| Caught {
            type_name: any::type_name::<E>(),
            error: e.into(),
        })
    }
}

impl<T, E: Into<anyhow::Error>> ToError for Result<T, E> {
    fn to_error(self) -> Option<Caught> {
        self.err().to_error()
    }
}

/// One error expectation.
///
/// A list of wants matches if any single want matches. Build the variants
/// with [`Want::err`], [`Want::of_type`], a string (substring match), or
/// [`Want::Nil`]; any other value supplied as a want lands in `Unsupported`
/// and never matches.
pub enum Want {
    /// Expect no error at all.
    Nil,
    /// Expect this error value, directly or anywhere in the wrap chain.
    Err(ErrWant),
    /// Expect the error message to contain this substring.
    Contains(String),
    /// Expect the error's concrete type.
    Type(TypeWant),
    /// A want the matcher cannot interpret; skipped during matching.
    Unsupported(Value),
}

/// An error-value expectation: concrete type plus message, checked against
/// every cause in the actual error's chain.
pub struct ErrWant {
    name: String,
    message: String,
    matches: Box<dyn Fn(&anyhow::Error) -> bool>,
}

/// A type-descriptor expectation, checked against the actual error's concrete
/// type only (not its causes).
pub struct TypeWant {
    name: String,
    matches: fn(&anyhow::Error) -> bool,
}

impl Want {
    /// Expect this error value.
    ///
    /// Matches when the actual error, or any error it transitively wraps, has
    /// the same concrete type and an equal message.
    pub fn err<E: StdError + Send + Sync + 'static>(e: E) -> Want {
        let message = e.to_string();
        let expected = message.clone();
        Want::Err(ErrWant {
            name: short_name(any::type_name::<E>()),
            message,
            matches: Box::new(move |actual| {
                actual
                    .chain()
                    .any(|cause| {
                        cause
                            .downcast_ref::<E>()
                            .is_some_and(|c| c.to_string() == expected)
                    })
            }),
        })
    }

    /// Expect the actual error's concrete type to be `E`.
    pub fn of_type<E: StdError + Send + Sync + 'static>() -> Want {
        Want::Type(TypeWant {
            name: short_name(any::type_name::<E>()),
            matches: is_type::<E>,
        })
    }
}

fn is_type<E: StdError + Send + Sync + 'static>(actual: &anyhow::Error) -> bool {
    actual.is::<E>()
}

impl fmt::Debug for Want {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Want::Nil => f.write_str("Nil"),
            Want::Err(w) => write!(f, "Err({}({}))", w.name, w.message),
            Want::Contains(s) => write!(f, "Contains({s:?})"),
            Want::Type(t) => write!(f, "Type({})", t.name),
            Want::Unsupported(v) => write!(f, "Unsupported({v})"),
        }
    }
}

// Rendering inside a "want any of the [...]" enumeration: error values render
// as their message, substrings quoted, type descriptors as bare names.
impl fmt::Display for Want {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Want::Nil => f.write_str("<nil>"),
            Want::Err(w) => f.write_str(&w.message),
            Want::Contains(s) => write!(f, "{s:?}"),
            Want::Type(t) => f.write_str(&t.name),
            Want::Unsupported(v) => write!(f, "{v}"),
        }
    }
}

/// Conversion of an error-assertion expectation argument.
///
/// Strings become substring wants; a converted [`Value`] maps nil to the
/// nil-marker and strings to substrings, with everything else unsupported —
/// the same routing a dynamic type switch would do.
pub trait IntoWant {
    fn into_want(self) -> Want;
}

impl IntoWant for Want {
    fn into_want(self) -> Want {
        self
    }
}

impl IntoWant for &str {
    fn into_want(self) -> Want {
        Want::Contains(self.to_owned())
    }
}

impl IntoWant for String {
    fn into_want(self) -> Want {
        Want::Contains(self)
    }
}

impl IntoWant for Value {
    fn into_want(self) -> Want {
        match self.kind() {
            Kind::Nil => Want::Nil,
            Kind::Str(s) => Want::Contains(s.clone()),
            _ => Want::Unsupported(self),
        }
    }
}

// Scalars supplied as wants are not interpretable as error expectations; they
// surface as "unsupported want type" failures rather than being rejected at
// compile time, matching the matcher's lenient contract.
macro_rules! unsupported_want {
    ($($t:ty),* $(,)?) => {
        $(impl IntoWant for $t {
            fn into_want(self) -> Want {
                Want::Unsupported(self.to_value())
            }
        })*
    };
}

unsupported_want!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Outcome of matching an error against its wants; the facade maps this onto
/// the reporter.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Pass,
    /// Non-fatal failure with a diagnostic.
    Fail(String),
    /// Fatal failure: an error arrived where none was expected.
    Fatal(String),
}

/// Match a caught error (or its absence) against the supplied wants.
pub(crate) fn match_error(caught: Option<Caught>, wants: &[Want]) -> Outcome {
    // Zero wants means "any error".
    if wants.is_empty() {
        return match caught {
            Some(_) => Outcome::Pass,
            None => Outcome::Fail("want error, got <nil>".to_owned()),
        };
    }

    for want in wants {
        match want {
            // The nil-marker decides immediately: a real error here is the
            // one condition severe enough to abort the test.
            Want::Nil => {
                return match &caught {
                    None => Outcome::Pass,
                    Some(c) => Outcome::Fatal(format!("unexpected error: {}", c.message())),
                };
            }
            Want::Err(w) => {
                if let Some(c) = &caught {
                    if (w.matches)(&c.error) {
                        return Outcome::Pass;
                    }
                }
            }
            Want::Contains(pattern) => {
                if let Some(c) = &caught {
                    if c.message().contains(pattern.as_str()) {
                        return Outcome::Pass;
                    }
                }
            }
            Want::Type(t) => {
                if let Some(c) = &caught {
                    if (t.matches)(&c.error) {
                        return Outcome::Pass;
                    }
                }
            }
            // Skipped when mixed with valid wants; still enumerated below.
            Want::Unsupported(_) => {}
        }
    }

    if let [Want::Unsupported(v)] = wants {
        return Outcome::Fail(format!(
            "unsupported want type: {}",
            short_name(v.type_name())
        ));
    }

    let Some(c) = &caught else {
        return Outcome::Fail("want error, got <nil>".to_owned());
    };

    let got = format!("{}({})", c.short_type(), c.message());
    let msg = if let [want] = wants {
        match want {
            Want::Err(w) => format!("want {}({}), got {}", w.name, w.message, got),
            Want::Contains(pattern) => {
                format!("want {:?}, got {:?}", pattern, c.message())
            }
            Want::Type(t) => format!("want {}, got {}", t.name, c.short_type()),
            _ => format!("want {want}, got {got}"),
        }
    } else {
        let list: Vec<String> = wants.iter().map(ToString::to_string).collect();
        format!("want any of the [{}], got {}", list.join(" "), got)
    };
    Outcome::Fail(msg)
}
