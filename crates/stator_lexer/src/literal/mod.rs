//! Literal scanners.
//!
//! - [`numeric`]: decimal, hex, octal (modern and legacy), binary, BigInt.
//! - [`string`]: quoted strings and the shared escape decoder.
//! - [`template`]: template segments between backticks and `${ … }`.
//! - [`regexp`]: regular-expression bodies and flags.

pub(crate) mod numeric;
pub(crate) mod regexp;
pub(crate) mod string;
pub(crate) mod template;
