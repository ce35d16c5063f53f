//! Diagnostics for PO catalog processing.
//!
//! Catalog readers and writers never print or exit on their own. They hand
//! every problem to an [`XerrorHandler`], a table with exactly two
//! callbacks:
//!
//! - `xerror` receives a single [`Diagnostic`];
//! - `xerror2` receives two related diagnostics, such as a duplicate entry
//!   and the earlier definition it clashes with.
//!
//! Severities below [`Severity::Fatal`] return control to the caller.
//! A fatal diagnostic is delivered first and then surfaces as
//! [`FatalDiagnostic`], leaving the decision to terminate with the host.
//!
//! [`TextmodeReporter`] is the stock implementation of both slots and
//! writes compiler-style lines to standard error; [`CollectingReporter`]
//! keeps diagnostics in memory instead.

pub mod collect;
pub mod diagnostic;
pub mod error;
pub mod handler;
pub mod severity;
pub mod textmode;

pub use collect::{CollectingReporter, Report};
pub use diagnostic::{Diagnostic, MessageRef};
pub use error::{DiagnosticError, DispatchResult, FatalDiagnostic};
pub use handler::{Reporter, XerrorHandler, XerrorHandlerBuilder};
pub use severity::Severity;
pub use textmode::{ColorChoice, ReporterOptions, TextmodeReporter};
