//! Code-addressable domain errors.
//!
//! A [`DomainError`] is identified by its code alone. Sentinels are declared as
//! `static` values next to the aggregate that raises them, and callers test for
//! a specific failure with [`DomainError::matches_code`] rather than by message
//! text. Several independent failures from one operation travel together as
//! [`DomainErrors`].

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared, thread-safe underlying cause of a [`DomainError`].
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// A business rule or invariant violation.
///
/// Equality and hashing consider only the code: two values with the same code
/// are the same failure type regardless of message or wrapped cause.
#[derive(Debug, Clone)]
pub struct DomainError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    cause: Option<Cause>,
}

impl DomainError {
    /// Creates a sentinel with no cause.
    ///
    /// By convention `code` follows `AGGREGATE.REASON`, e.g. `PAYMENT.NOT_PENDING`.
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
            cause: None,
        }
    }

    /// Creates an error carrying `cause` as its source.
    pub fn wrapping<E>(code: &'static str, message: &'static str, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(code, message).wrap(cause)
    }

    /// Returns a copy of this error with `cause` attached.
    ///
    /// `self` is left untouched, so sentinels can be wrapped freely.
    pub fn wrap<E>(&self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            code: self.code.clone(),
            message: self.message.clone(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Returns the machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns true if `target` is, wraps, or joins an error with this code.
    ///
    /// The search follows the `source()` chain and descends into
    /// [`DomainErrors`] containers at any depth.
    pub fn matches_code(&self, target: &(dyn StdError + 'static)) -> bool {
        let mut current = Some(target);
        while let Some(err) = current {
            if let Some(domain) = err.downcast_ref::<DomainError>() {
                if domain.code == self.code {
                    return true;
                }
            }
            if let Some(joined) = err.downcast_ref::<DomainErrors>() {
                if joined.iter().any(|member| self.matches_code(member)) {
                    return true;
                }
            }
            current = err.source();
        }
        false
    }
}

impl PartialEq for DomainError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for DomainError {}

impl Hash for DomainError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "[{}] {}: {}", self.code, self.message, cause),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// One or more domain errors raised together by a single operation.
///
/// Never empty. Membership is tested by code via [`DomainErrors::contains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainErrors(Vec<DomainError>);

impl DomainErrors {
    /// Collects every failed check.
    ///
    /// Returns `Ok(())` when all checks passed, otherwise every failure in
    /// evaluation order.
    pub fn join<I>(checks: I) -> std::result::Result<(), DomainErrors>
    where
        I: IntoIterator<Item = Option<DomainError>>,
    {
        let failures: Vec<DomainError> = checks.into_iter().flatten().collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DomainErrors(failures))
        }
    }

    /// Returns true if an error with the same code as `kind` is present.
    pub fn contains(&self, kind: &DomainError) -> bool {
        kind.matches_code(self)
    }

    /// Returns the codes of all contained errors, in order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(DomainError::code)
    }

    /// Iterates over the contained errors.
    pub fn iter(&self) -> std::slice::Iter<'_, DomainError> {
        self.0.iter()
    }

    /// Returns the number of contained errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<DomainError> for DomainErrors {
    fn from(error: DomainError) -> Self {
        DomainErrors(vec![error])
    }
}

impl IntoIterator for DomainErrors {
    type Item = DomainError;
    type IntoIter = std::vec::IntoIter<DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DomainErrors {
    type Item = &'a DomainError;
    type IntoIter = std::slice::Iter<'a, DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DomainErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl StdError for DomainErrors {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.first().map(|error| error as &(dyn StdError + 'static))
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainErrors>;

/// Returns the value inside `result`, aborting the process on error.
///
/// Only for static initialization and test fixtures, where an error means the
/// program itself is wrong. Never call it on an operation path.
///
/// # Panics
///
/// Panics with the rendered error when `result` is `Err`.
pub fn must<T, E: fmt::Display>(result: std::result::Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("initialization failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SENTINEL: DomainError = DomainError::new("TEST.CODE", "test message");

    #[derive(Debug, thiserror::Error)]
    #[error("underlying cause")]
    struct Underlying;

    #[derive(Debug, thiserror::Error)]
    #[error("outer: {0}")]
    struct Outer(#[source] DomainError);

    #[test]
    fn test_new_has_no_cause() {
        assert_eq!(SENTINEL.code(), "TEST.CODE");
        assert_eq!(SENTINEL.message(), "test message");
        assert!(SENTINEL.cause().is_none());
    }

    #[test]
    fn test_wrapping_sets_cause() {
        let err = DomainError::wrapping("TEST.CODE", "test message", Underlying);
        assert_eq!(err.code(), "TEST.CODE");
        assert_eq!(err.cause().unwrap().to_string(), "underlying cause");
        assert_eq!(err.source().unwrap().to_string(), "underlying cause");
    }

    #[test]
    fn test_display_without_cause() {
        assert_eq!(SENTINEL.to_string(), "[TEST.CODE] test message");
    }

    #[test]
    fn test_display_with_cause() {
        let err = SENTINEL.wrap(Underlying);
        assert_eq!(err.to_string(), "[TEST.CODE] test message: underlying cause");
    }

    #[test]
    fn test_wrap_leaves_sentinel_untouched() {
        let wrapped = SENTINEL.wrap(Underlying);
        assert_eq!(wrapped.code(), SENTINEL.code());
        assert_eq!(wrapped.message(), SENTINEL.message());
        assert!(wrapped.cause().is_some());
        assert!(SENTINEL.cause().is_none());
    }

    #[test]
    fn test_equality_is_by_code() {
        let other_message = DomainError::new("TEST.CODE", "different message");
        assert_eq!(SENTINEL, other_message);
        assert_eq!(SENTINEL.wrap(Underlying), SENTINEL);
        assert_ne!(SENTINEL, DomainError::new("OTHER.CODE", "test message"));
    }

    #[test]
    fn test_matches_code_across_wrap() {
        let wrapped = SENTINEL.wrap(Underlying);
        assert!(SENTINEL.matches_code(&wrapped));
    }

    #[test]
    fn test_matches_code_through_foreign_wrapper() {
        let outer = Outer(SENTINEL.wrap(Underlying));
        assert!(SENTINEL.matches_code(&outer));
    }

    #[test]
    fn test_matches_code_through_domain_cause() {
        let inner = DomainError::new("INNER.CODE", "inner");
        let outer = DomainError::new("OUTER.CODE", "outer").wrap(inner.clone());
        assert!(inner.matches_code(&outer));
    }

    #[test]
    fn test_matches_code_rejects_other_codes() {
        let other = DomainError::new("OTHER.CODE", "test message");
        assert!(!SENTINEL.matches_code(&other));
        assert!(!SENTINEL.matches_code(&Underlying));
    }

    #[test]
    fn test_join_all_passing() {
        assert!(DomainErrors::join([None, None]).is_ok());
        assert!(DomainErrors::join(std::iter::empty()).is_ok());
    }

    #[test]
    fn test_join_keeps_every_failure_in_order() {
        let first = DomainError::new("A.ONE", "one");
        let second = DomainError::new("A.TWO", "two");
        let err = DomainErrors::join([Some(first.clone()), None, Some(second.clone())])
            .unwrap_err();

        assert_eq!(err.len(), 2);
        assert!(err.contains(&first));
        assert!(err.contains(&second));
        assert!(!err.contains(&SENTINEL));
        assert_eq!(err.codes().collect::<Vec<_>>(), vec!["A.ONE", "A.TWO"]);
        assert_eq!(err.to_string(), "[A.ONE] one\n[A.TWO] two");
    }

    #[test]
    fn test_join_membership_survives_wrapping() {
        let err = DomainErrors::join([Some(SENTINEL.wrap(Underlying))]).unwrap_err();
        assert!(err.contains(&SENTINEL));

        let nested = DomainError::new("OUTER.CODE", "outer").wrap(err);
        assert!(SENTINEL.matches_code(&nested));
    }

    #[test]
    fn test_single_error_converts_to_join() {
        let err: DomainErrors = SENTINEL.clone().into();
        assert_eq!(err.len(), 1);
        assert_eq!(err.iter().collect::<Vec<_>>(), vec![&SENTINEL]);
    }

    #[test]
    fn test_must_returns_value() {
        let value = must::<_, DomainError>(Ok("expected value"));
        assert_eq!(value, "expected value");
    }

    #[test]
    #[should_panic(expected = "initialization failed")]
    fn test_must_panics_on_error() {
        must::<(), _>(Err(SENTINEL.clone()));
    }
}
