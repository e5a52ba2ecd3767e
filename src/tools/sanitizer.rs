//! Expression sanitization for the calculator tool.
//!
//! Models frequently name math functions through a host-language namespace
//! (`math.sqrt`, `np.pi`). The evaluator only accepts bare names, so this
//! boundary absorbs the mismatch instead of teaching the model new syntax.

use std::fmt;

/// Namespace-style prefixes stripped from raw expressions, case-sensitive.
pub const STRIPPED_PREFIXES: [&str; 4] = ["math.", "Math.", "numpy.", "np."];

/// An expression with every stripped prefix removed.
///
/// Only [`sanitize`] produces values of this type, so holding one is proof
/// the expression is prefix-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedExpression(String);

impl SanitizedExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw expression into an evaluator-safe form.
///
/// Pure and deterministic; never fails. An expression with no matching
/// prefixes passes through unchanged. A single replacement pass can splice
/// a fresh prefix together out of the surrounding text (`"numnp.py."`
/// becomes `"numpy."`), so stripping repeats until a fixpoint is reached,
/// which also makes the function idempotent.
pub fn sanitize(raw: &str) -> SanitizedExpression {
    let mut current = raw.to_string();
    loop {
        let mut next = current.clone();
        for prefix in STRIPPED_PREFIXES {
            next = next.replace(prefix, "");
        }
        if next == current {
            return SanitizedExpression(current);
        }
        current = next;
    }
}
