#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]
//! A URL processing core: parsing, canonicalization and relative
//! resolution with the compatibility quirks of real-world web URLs.
//!
//! The pipeline has three stages, usable separately or through the
//! top-level helpers here:
//!
//! - **Parsing** ([`parse_standard_url`], [`parse_file_url`],
//!   [`parse_path_url`]) slices a spec into [`Component`] ranges without
//!   validating or copying anything.
//! - **Canonicalization** ([`canonicalize`] and the [`canon`] module)
//!   rewrites the parsed pieces into one normalized ASCII form: schemes
//!   and hosts lowercased, IPv4 spellings decoded to dotted decimal,
//!   paths with `.`/`..` resolved and backslashes folded, escapes
//!   uppercased. The output is bit-stable and suitable for security
//!   decisions; invalid input still yields a best-effort string plus a
//!   `false` result.
//! - **Resolution** ([`resolve_relative`]) interprets a reference
//!   against an already-canonical base.
//!
//! Input may be 8-bit (`str`/`[u8]`, treated as UTF-8 where character
//! semantics matter) or 16-bit (`[u16]`, UTF-16); output is always ASCII.
//!
//! # Examples
//!
//! ```
//! use weburl::{canonicalize, CanonOutput, Parsed};
//!
//! let mut output = CanonOutput::new();
//! let mut parsed = Parsed::default();
//! assert!(canonicalize("HTTP://0x7f.1/a/../b", None, &mut output, &mut parsed));
//! assert_eq!(output.as_str(), "http://127.0.0.1/b");
//! ```

pub mod canon;
pub mod encoding;
pub mod parse;
pub mod resolve;

mod component;
mod registry;

pub use canon::{CharsetConverter, Replacements};
pub use component::{Component, Parsed};
pub use encoding::{CanonOutput, Spec, SpecUnit};
pub use parse::{
    extract_file_name, extract_query_key_value, extract_scheme, parse_file_url, parse_path_url,
    parse_port, parse_standard_url, PORT_INVALID, PORT_UNSPECIFIED,
};
pub use registry::{add_standard_scheme, is_standard_scheme};
pub use resolve::Relativity;

use canon::Override;
use encoding::check_spec_len;

fn canonicalize_units<U: SpecUnit>(
    units: &[U],
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    output_parsed: &mut Parsed,
) -> bool {
    let Some(scheme) = parse::extract_scheme_range(units, 0, units.len()) else {
        return false;
    };

    // Pick the parser and canonicalizer by scheme type.
    if registry::lower_case_equals_ascii(scheme.slice(units), "file") {
        let parsed_input = parse::parse_file_url_units(units);
        canon::canonicalize_file_url_from(
            &canon::Sources::from_parsed(units, &parsed_input),
            converter,
            output,
            output_parsed,
        )
    } else if registry::is_standard_scheme_units(scheme.slice(units)) {
        let parsed_input = parse::parse_standard_url_units(units);
        canon::canonicalize_standard_url_from(
            &canon::Sources::from_parsed(units, &parsed_input),
            converter,
            output,
            output_parsed,
        )
    } else {
        // The weird ones: javascript:, data:, about:.
        let parsed_input = parse::parse_path_url_units(units);
        canon::canonicalize_path_url_from(
            &canon::Sources::from_parsed(units, &parsed_input),
            output,
            output_parsed,
        )
    }
}

/// Parses and canonicalizes a spec in one step, dispatching on its scheme:
/// file URLs and registered standard schemes get full authority and path
/// treatment, everything else is handled as an opaque path URL.
///
/// Returns whether a valid URL was produced. On failure the output and
/// parsed structure are still filled consistently, they just do not
/// represent a loadable URL. A spec with no scheme at all produces no
/// output.
pub fn canonicalize<S: Spec + ?Sized>(
    spec: &S,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    output_parsed: &mut Parsed,
) -> bool {
    let units = spec.units();
    check_spec_len(units);
    canonicalize_units(units, converter, output, output_parsed)
}

/// Resolves `relative` against a canonical base, producing a canonical
/// URL. The reference need not actually be relative: an absolute
/// reference is simply canonicalized.
///
/// Returns whether the output is valid. Resolution fails outright (with
/// the base copied through as the output) when the reference cannot be
/// interpreted against this base.
///
/// # Examples
///
/// ```
/// use weburl::{parse_standard_url, resolve_relative, CanonOutput, Parsed};
///
/// let base = "http://www.google.com/blah/bloo?c#d";
/// let base_parsed = parse_standard_url(base);
///
/// let mut output = CanonOutput::new();
/// let mut parsed = Parsed::default();
/// assert!(resolve_relative(
///     base,
///     &base_parsed,
///     "../../../hello/./world.html?a#b",
///     None,
///     &mut output,
///     &mut parsed,
/// ));
/// assert_eq!(output.as_str(), "http://www.google.com/hello/world.html?a#b");
/// ```
pub fn resolve_relative<S: Spec + ?Sized>(
    base_spec: &str,
    base_parsed: &Parsed,
    relative: &S,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    output_parsed: &mut Parsed,
) -> bool {
    let units = relative.units();
    check_spec_len(units);

    let base_bytes = base_spec.as_bytes();
    let standard_base = registry::is_standard_scheme_units(base_parsed.scheme.slice(base_bytes));

    match resolve::classify_relative_units(base_bytes, base_parsed.scheme, units, standard_base) {
        Relativity::Unresolvable => false,
        Relativity::Relative(relative_component) => {
            let base_is_file =
                registry::lower_case_equals_ascii(base_parsed.scheme.slice(base_bytes), "file");
            resolve::resolve_relative_url_units(
                base_spec,
                base_parsed,
                base_is_file,
                units,
                relative_component,
                converter,
                output,
                output_parsed,
            )
        }
        Relativity::Absolute => canonicalize_units(units, converter, output, output_parsed),
    }
}

/// Canonicalizes a valid spec with some components replaced, dispatching
/// on the scheme of the *resulting* URL: replacing the scheme of an http
/// URL with `file` runs the file canonicalizer, and so on.
///
/// Returns whether the resulting URL is valid.
pub fn replace_components(
    spec: &str,
    parsed: &Parsed,
    replacements: &Replacements<'_>,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    out_parsed: &mut Parsed,
) -> bool {
    let bytes = spec.as_bytes();

    let scheme_matches = |name: &str| match replacements.scheme {
        Override::Keep => registry::lower_case_equals_ascii(parsed.scheme.slice(bytes), name),
        Override::Set(s) => registry::lower_case_equals_ascii(s.as_bytes(), name),
        Override::Remove => false,
    };

    if scheme_matches("file") {
        return canon::replace_file_url(spec, parsed, replacements, converter, output, out_parsed);
    }

    let standard = match replacements.scheme {
        Override::Keep => registry::is_standard_scheme_units(parsed.scheme.slice(bytes)),
        Override::Set(s) => registry::is_standard_scheme_units(s.as_bytes()),
        Override::Remove => false,
    };
    if standard {
        return canon::replace_standard_url(
            spec,
            parsed,
            replacements,
            converter,
            output,
            out_parsed,
        );
    }

    canon::replace_path_url(spec, parsed, replacements, output, out_parsed)
}

/// Checks whether the spec's scheme is a registered standard scheme.
pub fn is_standard<S: Spec + ?Sized>(spec: &S) -> bool {
    let units = spec.units();
    match parse::extract_scheme_range(units, 0, units.len()) {
        Some(scheme) => registry::is_standard_scheme_units(scheme.slice(units)),
        None => false,
    }
}

/// Locates the scheme in `spec` and compares it case-insensitively to
/// `compare` (which must be lowercase ASCII). Returns the comparison
/// result together with the scheme's range, which is an absent component
/// when no scheme was found.
pub fn find_and_compare_scheme<S: Spec + ?Sized>(spec: &S, compare: &str) -> (bool, Component) {
    let units = spec.units();
    match parse::extract_scheme_range(units, 0, units.len()) {
        Some(scheme) => (
            registry::lower_case_equals_ascii(scheme.slice(units), compare),
            scheme,
        ),
        None => (false, Component::default()),
    }
}
