//! Format strings: compiling, substitution and lint checks
//!
//! A format string is a user-supplied snippet template such as
//!
//! ```text
//! @mixin ${name} {\n\tfont-size: ${Mobile};\n}
//! ```
//!
//! where `\t` and `\n` are literal two-character escape markers and `${...}`
//! are placeholders filled from a resolved value map.

mod compile;
pub mod lexer;
pub mod lint;
mod substitute;

pub use compile::{compile, FormatTemplate, Line, LineTag};
pub use lint::{LintCategory, LintWarning};
pub use substitute::{substitute, Values};
