//! Validation guards.
//!
//! Each guard returns `None` when the value passes and a copy of the supplied
//! error kind when it fails. Results are meant to be fed to
//! [`DomainErrors::join`](crate::error::DomainErrors::join) so that every
//! violated rule is reported at once.

use std::cmp::Ordering;

use regex::Regex;

use crate::error::DomainError;

/// Fails when `value` is empty or whitespace only.
pub fn not_blank(value: &str, kind: &DomainError) -> Option<DomainError> {
    fail_if(value.trim().is_empty(), kind)
}

/// Fails when `value` is zero or negative.
///
/// Zero is whatever `T::default()` returns; unordered values such as NaN fail.
pub fn positive<T>(value: &T, kind: &DomainError) -> Option<DomainError>
where
    T: PartialOrd + Default,
{
    fail_if(value.partial_cmp(&T::default()) != Some(Ordering::Greater), kind)
}

/// Fails when `value` does not match `pattern`.
pub fn matches_pattern(value: &str, pattern: &Regex, kind: &DomainError) -> Option<DomainError> {
    fail_if(!pattern.is_match(value), kind)
}

/// Fails when `value` is absent.
pub fn not_absent<T>(value: Option<&T>, kind: &DomainError) -> Option<DomainError> {
    fail_if(value.is_none(), kind)
}

/// Fails when `value` is present.
pub fn is_absent<T>(value: Option<&T>, kind: &DomainError) -> Option<DomainError> {
    fail_if(value.is_some(), kind)
}

fn fail_if(failed: bool, kind: &DomainError) -> Option<DomainError> {
    failed.then(|| kind.clone())
}
