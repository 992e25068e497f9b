//! Host canonicalization.

use crate::canon::ip::canonicalize_ip_address;
use crate::component::Component;
use crate::encoding::{
    append_escaped_char, append_utf8_escaped_char, decode_escaped, CanonOutput, SpecUnit,
};

/// Characters that can never appear in a canonical registered name.
fn is_forbidden_host_byte(b: u8) -> bool {
    b <= b' '
        || b == 0x7f
        || matches!(
            b,
            b'#' | b'/' | b'\\' | b'?' | b'@' | b':' | b'[' | b']'
        )
}

/// Canonicalizes a host component.
///
/// IPv4 spellings become dotted decimal and IPv6 literals are validated
/// and copied through. Anything else is a registered name: ASCII letters
/// are lowercased, forbidden punctuation and non-ASCII make the host
/// invalid (there is no IDN mapping here), and percent-escapes are decoded
/// so that escaped ASCII participates in the checks above.
pub fn canonicalize_host<U: SpecUnit>(
    spec: &[U],
    host: Component,
    output: &mut CanonOutput,
    out_host: &mut Component,
) -> bool {
    if host.len <= 0 {
        *out_host = Component::new(output.len() as i32, 0);
        return true;
    }

    if canonicalize_ip_address(spec, host, output, out_host) {
        return true;
    }

    out_host.begin = output.len() as i32;
    let begin = host.begin as usize;
    let end = host.end() as usize;

    let mut success = true;
    let mut i = begin;
    while i < end {
        let v = spec[i].value();
        if v == b'%' as u32 {
            match decode_escaped(spec, &mut i, end) {
                Some(byte) if byte < 0x80 => {
                    // Escaped ASCII obeys the same rules as the raw form.
                    if is_forbidden_host_byte(byte) || byte == b'%' {
                        append_escaped_char(byte, output);
                        success = false;
                    } else {
                        output.push(byte.to_ascii_lowercase());
                    }
                }
                Some(byte) => {
                    // An escaped byte of a UTF-8 sequence: keep it escaped
                    // with normalized hex. Without IDN this host cannot be
                    // resolved, so it is invalid.
                    append_escaped_char(byte, output);
                    success = false;
                }
                None => {
                    // Not a valid escape; the percent stands for itself.
                    append_escaped_char(b'%', output);
                    success = false;
                }
            }
        } else if v < 0x80 {
            let b = v as u8;
            if is_forbidden_host_byte(b) {
                append_escaped_char(b, output);
                success = false;
            } else {
                output.push(b.to_ascii_lowercase());
            }
        } else {
            // Non-ASCII: transcode to escaped UTF-8, but the host remains
            // unresolvable without IDN.
            append_utf8_escaped_char(spec, &mut i, end, output);
            success = false;
        }
        i += 1;
    }

    out_host.len = output.len() as i32 - out_host.begin;
    success
}
