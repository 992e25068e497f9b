//! Canonicalizers for the scheme, userinfo, port and ref components.

use crate::component::Component;
use crate::encoding::{
    append_escaped_char, append_invalid_narrow_string, append_string_of_type,
    append_utf8_escaped_char, table, CanonOutput, SpecUnit,
};
use crate::parse::{parse_port_units, PORT_INVALID, PORT_UNSPECIFIED};
use core::fmt::Write;

/// Returns the canonical (lowercased) form of a scheme character, or 0 if
/// the character cannot appear in a scheme.
pub(crate) fn canonical_scheme_char(b: u8) -> u8 {
    match b {
        b'a'..=b'z' | b'0'..=b'9' | b'+' | b'-' | b'.' => b,
        b'A'..=b'Z' => b + 0x20,
        _ => 0,
    }
}

/// Canonicalizes a scheme: ASCII letters lowercased, digits and `+-.`
/// passed through, a trailing colon appended. Anything else renders the
/// scheme invalid but is still escaped into the output.
pub fn canonicalize_scheme<U: SpecUnit>(
    spec: &[U],
    scheme: Component,
    output: &mut CanonOutput,
    out_scheme: &mut Component,
) -> bool {
    if scheme.len <= 0 {
        // Unspecified or empty scheme: emit just the separator.
        *out_scheme = Component::new(output.len() as i32, 0);
        output.push(b':');
        return false;
    }

    let begin = scheme.begin as usize;
    let end = scheme.end() as usize;
    out_scheme.begin = output.len() as i32;

    let mut success = true;
    let mut i = begin;
    while i < end {
        let v = spec[i].value();
        if v < 0x80 {
            let b = v as u8;
            // The first character must be a letter.
            let canonical = if i == begin && !b.is_ascii_alphabetic() {
                0
            } else {
                canonical_scheme_char(b)
            };
            if canonical != 0 {
                output.push(canonical);
                i += 1;
                continue;
            }
            if b == b'%' {
                // Escaping the percent would produce a different string on
                // every pass, so pass it through as-is.
                success = false;
                output.push(b'%');
                i += 1;
                continue;
            }
        }
        success = false;
        append_utf8_escaped_char(spec, &mut i, end, output);
        i += 1;
    }

    output.push(b':');
    out_scheme.len = output.len() as i32 - out_scheme.begin - 1;
    success
}

/// Canonicalizes the userinfo subcomponents. Empty username and password
/// are both stripped entirely; otherwise the username, an optional
/// `:password`, and the trailing `@` are emitted with everything outside
/// unreserved and sub-delims percent-escaped.
pub fn canonicalize_user_info<U: SpecUnit>(
    username_spec: &[U],
    username: Component,
    password_spec: &[U],
    password: Component,
    output: &mut CanonOutput,
    out_username: &mut Component,
    out_password: &mut Component,
) -> bool {
    if username.len <= 0 && password.len <= 0 {
        *out_username = Component::default();
        *out_password = Component::default();
        return true;
    }

    let mut success = true;
    out_username.begin = output.len() as i32;
    if username.len > 0 {
        success &= append_string_of_type(
            username_spec,
            username.begin as usize,
            username.end() as usize,
            table::CHAR_USERINFO,
            output,
        );
    }
    out_username.len = output.len() as i32 - out_username.begin;

    // An empty but specified password is stripped along with its colon.
    if password.len > 0 {
        output.push(b':');
        out_password.begin = output.len() as i32;
        success &= append_string_of_type(
            password_spec,
            password.begin as usize,
            password.end() as usize,
            table::CHAR_USERINFO,
            output,
        );
        out_password.len = output.len() as i32 - out_password.begin;
    } else {
        *out_password = Component::default();
    }

    output.push(b'@');
    success
}

/// Canonicalizes a port. An absent or empty port, or one matching the
/// scheme's default, is omitted entirely. An invalid port is copied
/// through (escaped) so the error remains visible, and fails.
pub fn canonicalize_port<U: SpecUnit>(
    spec: &[U],
    port: Component,
    default_port_for_scheme: i32,
    output: &mut CanonOutput,
    out_port: &mut Component,
) -> bool {
    let port_num = parse_port_units(spec, port);
    if port_num == PORT_UNSPECIFIED || port_num == default_port_for_scheme {
        *out_port = Component::default();
        return true;
    }
    if port_num == PORT_INVALID {
        // Copy the offending text so the error is visible in the output.
        output.push(b':');
        out_port.begin = output.len() as i32;
        append_invalid_narrow_string(spec, port.begin as usize, port.end() as usize, output);
        out_port.len = output.len() as i32 - out_port.begin;
        return false;
    }

    output.push(b':');
    out_port.begin = output.len() as i32;
    write!(output, "{port_num}").unwrap();
    out_port.len = output.len() as i32 - out_port.begin;
    true
}

/// Canonicalizes a ref: the `#` separator, control characters escaped,
/// printable ASCII passed through, non-ASCII transcoded to escaped UTF-8.
/// Malformed UTF escapes U+FFFD and reports failure, but the output is
/// still complete.
pub fn canonicalize_ref<U: SpecUnit>(
    spec: &[U],
    ref_: Component,
    output: &mut CanonOutput,
    out_ref: &mut Component,
) -> bool {
    if !ref_.is_valid() {
        *out_ref = Component::default();
        return true;
    }

    // The separator is emitted even for an empty but present ref.
    output.push(b'#');
    out_ref.begin = output.len() as i32;

    let mut success = true;
    let end = ref_.end() as usize;
    let mut i = ref_.begin as usize;
    while i < end {
        let v = spec[i].value();
        if v < 0x20 || v == 0x7f {
            append_escaped_char(v as u8, output);
        } else if v < 0x80 {
            output.push(v as u8);
        } else {
            success &= append_utf8_escaped_char(spec, &mut i, end, output);
        }
        i += 1;
    }
    out_ref.len = output.len() as i32 - out_ref.begin;
    success
}
