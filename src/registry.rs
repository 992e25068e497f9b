//! The process-wide standard-scheme registry.

use crate::encoding::{Spec, SpecUnit};
use std::sync::{OnceLock, RwLock};

// Schemes whose URLs get authority parsing and path canonicalization out
// of the box. Yes, file URLs can have a hostname.
const INITIAL_SCHEMES: [&str; 5] = ["http", "https", "file", "ftp", "gopher"];

static STANDARD_SCHEMES: OnceLock<RwLock<Vec<&'static str>>> = OnceLock::new();

fn schemes() -> &'static RwLock<Vec<&'static str>> {
    STANDARD_SCHEMES.get_or_init(|| RwLock::new(INITIAL_SCHEMES.to_vec()))
}

/// Adds an application-defined scheme to the list of standard schemes.
///
/// The name should be given in lowercase; lookups compare
/// case-insensitively against it. Entries live for the rest of the
/// process and cannot be removed. Register custom schemes during startup,
/// before URLs are processed concurrently.
pub fn add_standard_scheme(new_scheme: &str) {
    if new_scheme.is_empty() {
        return;
    }
    // The registry outlives every URL, so duplicate the name into static
    // storage rather than tracking ownership.
    let duplicated: &'static str = Box::leak(new_scheme.to_owned().into_boxed_str());
    schemes().write().unwrap().push(duplicated);
}

/// Compares a spec range case-insensitively against a lowercase ASCII
/// string.
pub(crate) fn lower_case_equals_ascii<U: SpecUnit>(a: &[U], lower: &str) -> bool {
    a.len() == lower.len()
        && a.iter().zip(lower.bytes()).all(|(&unit, b)| {
            let v = unit.value();
            v < 0x80 && (v as u8).to_ascii_lowercase() == b
        })
}

pub(crate) fn is_standard_scheme_units<U: SpecUnit>(scheme: &[U]) -> bool {
    schemes()
        .read()
        .unwrap()
        .iter()
        .any(|registered| lower_case_equals_ascii(scheme, registered))
}

/// Checks whether the given scheme is one of the registered standard
/// schemes, comparing case-insensitively.
///
/// # Examples
///
/// ```
/// use weburl::{add_standard_scheme, is_standard_scheme};
///
/// assert!(is_standard_scheme("HTTP"));
/// assert!(!is_standard_scheme("steam"));
/// add_standard_scheme("steam");
/// assert!(is_standard_scheme("steam"));
/// ```
pub fn is_standard_scheme<S: Spec + ?Sized>(scheme: &S) -> bool {
    is_standard_scheme_units(scheme.units())
}
