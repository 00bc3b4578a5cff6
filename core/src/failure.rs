//! The three-way failure taxonomy coroutines raise (§4.2, §7).
//!
//! A production's `Result<O, Failure<E>>` return carries one of three
//! outcomes instead of a plain error:
//!
//! - [`Failure::Recoverable`] — the usual case. Caught and rolled back by
//!   [`crate::engine::maybe`], [`crate::engine::first`] and
//!   [`crate::engine::furthest`]; propagates through anything else.
//! - [`Failure::Fatal`] — raised once a production has committed to a
//!   grammar rule and a later mismatch can no longer mean "try a
//!   different alternative" (§7 "fatal once committed"). Bypasses
//!   `maybe`/`first`/`furthest` entirely and rides a bare `?` straight to
//!   the top.
//! - [`Failure::Incomplete`] — "not enough input is buffered yet."
//!   Propagates through every combinator untouched; nothing commits
//!   partial progress on this path; [`crate::engine::Engine::run_once`]
//!   resets to the start and tells the driver to wait for more input via
//!   `feed` and retry the whole coroutine invocation from the top.
//!   Safe to retry from scratch because nothing was committed before it
//!   was raised.

use core::fmt;

/// A production's failure: either a grammar-level error `E`, tagged
/// recoverable or fatal, or a request for more input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// A grammar rule did not match; backtracking is still possible.
    Recoverable(E),
    /// A grammar rule matched enough to commit, then failed; no sibling
    /// alternative should be tried.
    Fatal(E),
    /// Not enough input has been buffered to decide; retry the whole
    /// invocation once more input arrives.
    Incomplete,
}

impl<E> Failure<E> {
    /// Promotes a recoverable failure to fatal; leaves `Fatal` and
    /// `Incomplete` untouched. This is the `fatal(...)` combinator's
    /// building block.
    #[inline]
    #[must_use]
    pub fn into_fatal(self) -> Self {
        match self {
            Failure::Recoverable(e) => Failure::Fatal(e),
            other => other,
        }
    }

    /// The grammar-level error, if this isn't `Incomplete`.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        match self {
            Failure::Recoverable(e) | Failure::Fatal(e) => Some(e),
            Failure::Incomplete => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Failure::Recoverable(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Failure::Incomplete)
    }

    /// Maps the grammar-level error, preserving which variant carried it.
    #[inline]
    #[must_use]
    pub fn map_err<F, O>(self, f: F) -> Failure<O>
    where
        F: FnOnce(E) -> O,
    {
        match self {
            Failure::Recoverable(e) => Failure::Recoverable(f(e)),
            Failure::Fatal(e) => Failure::Fatal(f(e)),
            Failure::Incomplete => Failure::Incomplete,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Recoverable(e) => write!(f, "{e}"),
            Failure::Fatal(e) => write!(f, "{e}"),
            Failure::Incomplete => write!(f, "incomplete: more input needed"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: std::error::Error + 'static> std::error::Error for Failure<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Failure::Recoverable(e) | Failure::Fatal(e) => Some(e),
            Failure::Incomplete => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_fatal_promotes_recoverable_only() {
        assert_eq!(Failure::Recoverable(1).into_fatal(), Failure::Fatal(1));
        assert_eq!(Failure::Fatal(1).into_fatal(), Failure::Fatal(1));
        assert_eq!(Failure::<i32>::Incomplete.into_fatal(), Failure::Incomplete);
    }

    #[test]
    fn predicates_match_variant() {
        assert!(Failure::Recoverable(1).is_recoverable());
        assert!(Failure::Fatal(1).is_fatal());
        assert!(Failure::<i32>::Incomplete.is_incomplete());
    }

    #[test]
    fn map_err_preserves_variant() {
        let mapped = Failure::Recoverable(1).map_err(|n| n + 1);
        assert_eq!(mapped, Failure::Recoverable(2));
        let mapped = Failure::Fatal(1).map_err(|n| n + 1);
        assert_eq!(mapped, Failure::Fatal(2));
    }
}
