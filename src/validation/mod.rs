//! Declarative request validation
//!
//! Every controller validates its payload through this module: a closed
//! library of named, parameterized predicates ([`rules`]), a template-based
//! message renderer ([`messages`]), and the orchestrating [`validator`] that
//! applies an ordered field -> rule-set schema and produces a structured
//! error map.
//!
//! Rule failures are data, never errors. Only infrastructure failures (the
//! store going away mid-check) propagate as `Err`.

pub mod messages;
pub mod rules;
pub mod validator;

pub use rules::{Rule, RuleContext};
pub use validator::{Schema, Validation, validate};
