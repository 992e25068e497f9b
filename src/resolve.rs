//! Relative URL resolution against a canonical base.

use crate::canon::parts::{canonical_scheme_char, canonicalize_ref};
use crate::canon::path::{canonicalize_partial_path, canonicalize_path, file_canonicalize_path};
use crate::canon::query::canonicalize_query;
use crate::canon::CharsetConverter;
use crate::component::{Component, Parsed};
use crate::encoding::{check_spec_len, CanonOutput, Spec, SpecUnit};
use crate::parse::{
    count_consecutive_slashes, does_begin_windows_drive_spec, extract_scheme_range, is_url_slash,
    parse_path_internal, trim_url,
};

/// How a reference relates to a base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relativity {
    /// The reference stands on its own and should be canonicalized alone.
    Absolute,
    /// The reference is relative; the component covers the portion of it
    /// to resolve against the base.
    Relative(Component),
    /// The reference has no scheme and the base is not hierarchical, so
    /// there is nothing to resolve it against.
    Unresolvable,
}

/// The base URL is canonical and therefore ASCII, so comparing against its
/// scheme only requires mapping the reference's characters.
fn schemes_equal<U: SpecUnit>(
    base: &[u8],
    base_scheme: Component,
    cmp: &[U],
    cmp_scheme: Component,
) -> bool {
    if base_scheme.len != cmp_scheme.len {
        return false;
    }
    for i in 0..base_scheme.len {
        let v = cmp[(cmp_scheme.begin + i) as usize].value();
        let mapped = if v < 0x80 {
            canonical_scheme_char(v as u8)
        } else {
            0
        };
        if mapped != base[(base_scheme.begin + i) as usize] {
            return false;
        }
    }
    true
}

pub(crate) fn classify_relative_units<U: SpecUnit>(
    base: &[u8],
    base_scheme: Component,
    url: &[U],
    is_base_hierarchical: bool,
) -> Relativity {
    let mut begin = 0;
    let mut end = url.len();
    trim_url(url, &mut begin, &mut end);
    if begin >= end {
        // An empty reference is relative and resolves to the base itself.
        return Relativity::Relative(Component::new(begin as i32, 0));
    }

    // Drive letters link straight to a file, the way IE treats them.
    // "/c:/foo" on the other hand can be handled as an ordinary relative
    // path replacement and still come out right.
    if does_begin_windows_drive_spec(url, begin, end) {
        return Relativity::Absolute;
    }

    // A leading slash is definitely relative; this comes before scheme
    // extraction so "/foo:bar" is not mistaken for a scheme.
    if is_url_slash(url[begin]) {
        return Relativity::Relative(Component::range(begin as i32, end as i32));
    }

    let Some(scheme) = extract_scheme_range(url, begin, end) else {
        // No scheme: relative whenever the base can support it.
        if !is_base_hierarchical {
            return Relativity::Unresolvable;
        }
        return Relativity::Relative(Component::range(begin as i32, end as i32));
    };

    // A scheme alone does not make the reference absolute:
    // "http:foo.html" is a relative path on an http base.
    if !schemes_equal(base, base_scheme, url, scheme) {
        return Relativity::Absolute;
    }
    if !is_base_hierarchical {
        // With an opaque base, a same-scheme reference replaces it
        // entirely ("data:bar" against "data:foo" is absolute).
        return Relativity::Absolute;
    }

    let colon_offset = scheme.end() as usize;
    let num_slashes = count_consecutive_slashes(url, colon_offset + 1, end);
    if num_slashes == 0 || num_slashes == 1 {
        // "http:foo.html" is a relative path, "http:/foo" an absolute one.
        return Relativity::Relative(Component::range(colon_offset as i32 + 1, end as i32));
    }
    // Two or more slashes introduce a new authority.
    Relativity::Absolute
}

/// Decides whether `relative` is relative to a base with the given
/// canonical spec and scheme. `is_base_hierarchical` should be true when
/// the base's scheme is standard (its URLs have an authority and a path).
pub fn classify_relative<S: Spec + ?Sized>(
    base: &str,
    base_parsed: &Parsed,
    relative: &S,
    is_base_hierarchical: bool,
) -> Relativity {
    let units = relative.units();
    check_spec_len(units);
    classify_relative_units(base.as_bytes(), base_parsed.scheme, units, is_base_hierarchical)
}

/// Copies `spec[begin..end]` to the output up to and including the last
/// slash. The input is canonical, so only forward slashes occur. Copies
/// nothing when there is no slash.
fn copy_to_last_slash(spec: &[u8], begin: usize, end: usize, output: &mut CanonOutput) {
    let Some(last_slash) = (begin..end).rev().find(|&i| spec[i] == b'/') else {
        return;
    };
    for &b in &spec[begin..=last_slash] {
        output.push(b);
    }
}

/// Copies one already-canonical component verbatim, updating the output
/// component to the copied range.
fn copy_one_component(
    source: &[u8],
    source_component: Component,
    output: &mut CanonOutput,
    output_component: &mut Component,
) {
    if !source_component.is_valid() {
        *output_component = Component::default();
        return;
    }
    output_component.begin = output.len() as i32;
    for &b in source_component.slice(source) {
        output.push(b);
    }
    output_component.len = output.len() as i32 - output_component.begin;
}

/// When the base is a file URL whose path begins with a drive spec and the
/// reference does not bring its own, copies the `/C:` to the output so that
/// relative resolution cannot escape the drive. Returns the offset of the
/// next base character to process.
fn copy_base_drive_spec_if_necessary<U: SpecUnit>(
    base: &[u8],
    base_path_begin: usize,
    base_path_end: usize,
    relative: &[U],
    path_start: usize,
    relative_end: usize,
    output: &mut CanonOutput,
) -> usize {
    if base_path_begin >= base_path_end {
        return base_path_begin;
    }

    // A drive spec in the reference replaces the base's.
    if does_begin_windows_drive_spec(relative, path_start, relative_end) {
        return base_path_begin;
    }

    if is_url_slash(base[base_path_begin])
        && does_begin_windows_drive_spec(base, base_path_begin + 1, base_path_end)
    {
        output.push(b'/');
        output.push(base[base_path_begin + 1]);
        output.push(base[base_path_begin + 2]);
        return base_path_begin + 3;
    }
    base_path_begin
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_relative_url_units<U: SpecUnit>(
    base: &str,
    base_parsed: &Parsed,
    base_is_file: bool,
    relative: &[U],
    relative_component: Component,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    out_parsed: &mut Parsed,
) -> bool {
    *out_parsed = *base_parsed;
    let base_bytes = base.as_bytes();

    // Resolution needs a base with a host and a path; anything else hands
    // back the base itself as the error result.
    if base_parsed.host.len < 0 || base_parsed.path.len <= 0 {
        let base_len = base_parsed.length() as usize;
        for &b in &base_bytes[..base_len] {
            output.push(b);
        }
        return false;
    }

    if relative_component.len <= 0 {
        // Empty reference: the result is the base, unchanged.
        let base_len = base_parsed.length() as usize;
        for &b in &base_bytes[..base_len] {
            output.push(b);
        }
        return true;
    }

    let (path, query, ref_) = parse_path_internal(relative, relative_component);

    // The reference is known to be relative, so the authority cannot
    // change: copy the base through the end of it.
    for &b in &base_bytes[..base_parsed.path.begin as usize] {
        output.push(b);
    }

    let mut success = true;
    if path.len > 0 {
        let true_path_begin = output.len() as i32;

        if does_begin_windows_drive_spec(
            relative,
            relative_component.begin as usize,
            relative_component.end() as usize,
        ) {
            // "c:\foo" replaces the path outright; the file canonicalizer
            // normalizes the drive spec.
            success &= file_canonicalize_path(relative, path, output, &mut out_parsed.path);
        } else {
            let mut base_path_begin = base_parsed.path.begin as usize;
            if base_is_file {
                base_path_begin = copy_base_drive_spec_if_necessary(
                    base_bytes,
                    base_parsed.path.begin as usize,
                    base_parsed.path.end() as usize,
                    relative,
                    relative_component.begin as usize,
                    relative_component.end() as usize,
                    output,
                );
                // The output now reads "file://" or "file:///C:" and the
                // rest of the base path starts at `base_path_begin`.
            }

            if is_url_slash(relative[path.begin as usize]) {
                // An absolute path replaces the base path entirely.
                success &= canonicalize_path(relative, path, output, &mut out_parsed.path);
            } else {
                // Merge: the base path up to its last slash, then the
                // reference, letting "." and ".." cross the seam.
                let path_begin = output.len();
                copy_to_last_slash(
                    base_bytes,
                    base_path_begin,
                    base_parsed.path.end() as usize,
                    output,
                );
                success &= canonicalize_partial_path(relative, path, path_begin, output);
                out_parsed.path = Component::range(path_begin as i32, output.len() as i32);
            }
        }

        canonicalize_query(relative, query, converter, output, &mut out_parsed.query);
        canonicalize_ref(relative, ref_, output, &mut out_parsed.ref_);

        // Extend the path over any drive spec copied above.
        out_parsed.path = Component::range(true_path_begin, out_parsed.path.end());
        return success;
    }

    // Path unchanged: carry the base's through.
    copy_one_component(base_bytes, base_parsed.path, output, &mut out_parsed.path);

    if query.is_valid() {
        canonicalize_query(relative, query, converter, output, &mut out_parsed.query);
        canonicalize_ref(relative, ref_, output, &mut out_parsed.ref_);
        return success;
    }

    // Query unchanged as well; its separator comes along with it.
    if base_parsed.query.is_valid() {
        output.push(b'?');
    }
    copy_one_component(base_bytes, base_parsed.query, output, &mut out_parsed.query);

    if ref_.is_valid() {
        canonicalize_ref(relative, ref_, output, &mut out_parsed.ref_);
        return success;
    }

    if base_parsed.ref_.is_valid() {
        output.push(b'#');
    }
    copy_one_component(base_bytes, base_parsed.ref_, output, &mut out_parsed.ref_);
    success
}

/// Resolves a reference already classified as relative, composing the
/// preserved base components with the canonicalized reference components.
///
/// The base must be canonical, `relative_component` must come from
/// [`classify_relative`], and `base_is_file` tells the resolver to apply
/// the drive-letter preservation quirk.
#[allow(clippy::too_many_arguments)]
pub fn resolve_relative_url<S: Spec + ?Sized>(
    base: &str,
    base_parsed: &Parsed,
    base_is_file: bool,
    relative: &S,
    relative_component: Component,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    out_parsed: &mut Parsed,
) -> bool {
    let units = relative.units();
    check_spec_len(units);
    resolve_relative_url_units(
        base,
        base_parsed,
        base_is_file,
        units,
        relative_component,
        converter,
        output,
        out_parsed,
    )
}
