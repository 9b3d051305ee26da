//! Compound unit expressions: `"m^3/(kg s^2)"`, `"10^24 kg"`, `"d^-1"`.
//!
//! Evaluation works directly on the string.  Every call makes one scan
//! that tracks parenthesis depth, then tries, in this fixed order:
//!
//! 1. strip a leading `(` whose partner is the last character,
//! 2. split at the first top-level space (product),
//! 3. split at the first top-level `/` (quotient),
//! 4. split at the first top-level `^` (power),
//! 5. resolve a leaf: a linear registry symbol, else a float literal.
//!
//! Checking space first means it binds loosest and `^` tightest.  Each
//! split happens at the *first* top-level occurrence, and both sides are
//! evaluated again from step 1, so `a/b/c` reads as `a/(b/c)`.

use tracing::trace;

use crate::error::*;
use crate::registry::Registry;

// ────────────────────────────────────────────────────────────────────
//  Failure signalling
// ────────────────────────────────────────────────────────────────────

/// How a failed conversion is reported to the caller.
///
/// Both modes agree on *whether* a unit resolves; they only differ in
/// how the failure surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    /// Return the error as `Err`.
    #[default]
    Loud,
    /// Return `Ok(f64::NAN)` instead of the error.
    Quiet,
}

impl Failure {
    pub(crate) fn signal(self, result: Result<f64>) -> Result<f64> {
        match result {
            Err(e) if self == Failure::Quiet => {
                tracing::debug!(error = %e, "unit conversion failed, returning NaN");
                Ok(f64::NAN)
            }
            other => other,
        }
    }
}

// ────────────────────────────────────────────────────────────────────
//  Public entry points
// ────────────────────────────────────────────────────────────────────

/// Resolve `unit` to a multiplier relative to the registry's internal
/// units, reporting failures according to `failure`.
///
/// Nothing is written to the registry; memoization is the caller's job.
pub fn parse_compound_unit(unit: &str, registry: &Registry, failure: Failure) -> Result<f64> {
    failure.signal(try_parse_compound_unit(unit, registry))
}

/// Like [`parse_compound_unit`] but always returns the error.
///
/// A multiplier of zero, NaN or infinity (`"0 m"`, `"1/0"`) is rejected:
/// it could never be stored as a linear unit.
pub fn try_parse_compound_unit(unit: &str, registry: &Registry) -> Result<f64> {
    let value = evaluate(unit, registry, 0)?;
    if value == 0.0 || !value.is_finite() {
        return Err(UnitError::DegenerateMultiplier { unit: unit.to_string(), value });
    }
    Ok(value)
}

// ────────────────────────────────────────────────────────────────────
//  Scanner
// ────────────────────────────────────────────────────────────────────

/// Positions found by one depth-tracking pass over an expression.
#[derive(Debug, Default, PartialEq)]
struct Scan {
    /// Byte index of the `)` matching a leading `(`.
    leading_close: Option<usize>,
    space: Option<usize>,
    slash: Option<usize>,
    caret: Option<usize>,
}

/// Operators and parens are ASCII, so every recorded index is a char
/// boundary even when symbols contain `µ` or `°`.
fn scan(expr: &str) -> Result<Scan> {
    let leading_open = expr.starts_with('(');
    let mut depth = 0usize;
    let mut found = Scan::default();

    for (i, byte) in expr.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return Err(UnitError::UnmatchedParenthesis(expr.to_string()));
                }
                depth -= 1;
                if depth == 0 && leading_open && found.leading_close.is_none() {
                    found.leading_close = Some(i);
                }
            }
            b' ' if depth == 0 => { found.space.get_or_insert(i); }
            b'/' if depth == 0 => { found.slash.get_or_insert(i); }
            b'^' if depth == 0 => { found.caret.get_or_insert(i); }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(UnitError::UnmatchedParenthesis(expr.to_string()));
    }
    Ok(found)
}

// ────────────────────────────────────────────────────────────────────
//  Evaluator
// ────────────────────────────────────────────────────────────────────

/// Nesting limit for groups and operator splits.  Past it the expression
/// is rejected before the call stack runs out.
pub const MAX_DEPTH: usize = 128;

fn evaluate(expr: &str, registry: &Registry, depth: usize) -> Result<f64> {
    if depth > MAX_DEPTH {
        return Err(UnitError::TooDeep { limit: MAX_DEPTH });
    }
    if expr.is_empty() {
        return Err(UnitError::EmptySubexpression(String::new()));
    }

    let found = scan(expr)?;

    if found.leading_close == Some(expr.len() - 1) {
        let inner = &expr[1..expr.len() - 1];
        if inner.is_empty() {
            return Err(UnitError::EmptySubexpression(expr.to_string()));
        }
        trace!(expr, "strip parentheses");
        return evaluate(inner, registry, depth + 1);
    }

    if let Some(at) = found.space {
        let (lhs, rhs) = split(expr, at)?;
        trace!(expr, lhs, rhs, "split at ' '");
        return Ok(evaluate(lhs, registry, depth + 1)? * evaluate(rhs, registry, depth + 1)?);
    }

    if let Some(at) = found.slash {
        let (lhs, rhs) = split(expr, at)?;
        trace!(expr, lhs, rhs, "split at '/'");
        return Ok(evaluate(lhs, registry, depth + 1)? / evaluate(rhs, registry, depth + 1)?);
    }

    if let Some(at) = found.caret {
        let (lhs, rhs) = split(expr, at)?;
        trace!(expr, lhs, rhs, "split at '^'");
        return Ok(evaluate(lhs, registry, depth + 1)?.powf(evaluate(rhs, registry, depth + 1)?));
    }

    resolve_leaf(expr, registry)
}

/// Split around the one-byte operator at `at`; neither side may be empty.
fn split(expr: &str, at: usize) -> Result<(&str, &str)> {
    let (lhs, rhs) = (&expr[..at], &expr[at + 1..]);
    if lhs.is_empty() || rhs.is_empty() {
        return Err(UnitError::EmptySubexpression(expr.to_string()));
    }
    Ok((lhs, rhs))
}

fn resolve_leaf(token: &str, registry: &Registry) -> Result<f64> {
    if let Some(multiplier) = registry.lookup_linear(token) {
        return Ok(multiplier);
    }
    // `f64::from_str` also accepts "inf" and "NaN"; those are not units.
    match token.parse::<f64>() {
        Ok(literal) if literal.is_finite() => Ok(literal),
        _ => Err(UnitError::Unresolvable(token.to_string())),
    }
}
