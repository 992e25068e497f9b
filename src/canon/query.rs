//! Query canonicalization.

use crate::canon::CharsetConverter;
use crate::component::Component;
use crate::encoding::{
    append_escaped_char, append_utf8_value, read_utf_char, table, CanonOutput, SpecUnit,
};

fn append_raw_query_bytes(bytes: &[u8], output: &mut CanonOutput) {
    for &b in bytes {
        if table::is_query_char(b) {
            output.push(b);
        } else {
            append_escaped_char(b, output);
        }
    }
}

/// Canonicalizes a query: the `?` separator, query-safe bytes passed
/// through and everything else percent-escaped.
///
/// Without a converter, 8-bit input is escaped byte-for-byte (it is
/// expected to already be UTF-8) and 16-bit input is transcoded to UTF-8
/// first. With a converter, the query's code points are handed to it and
/// the bytes it produces are escaped; this supports legacy form encodings.
pub fn canonicalize_query<U: SpecUnit>(
    spec: &[U],
    query: Component,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    out_query: &mut Component,
) {
    if !query.is_valid() {
        *out_query = Component::default();
        return;
    }

    output.push(b'?');
    out_query.begin = output.len() as i32;

    let begin = query.begin as usize;
    let end = query.end() as usize;
    match converter {
        Some(converter) => {
            // Hand the code points to the converter, then escape whatever
            // bytes it produced. Malformed input becomes U+FFFD first.
            let mut text = String::new();
            let mut i = begin;
            while i < end {
                let (code_point, _) = read_utf_char(spec, &mut i, end);
                text.push(char::from_u32(code_point).unwrap_or('\u{fffd}'));
                i += 1;
            }
            let mut encoded = Vec::new();
            converter.convert(&text, &mut encoded);
            append_raw_query_bytes(&encoded, output);
        }
        None => match U::as_bytes(&spec[begin..end]) {
            Some(bytes) => append_raw_query_bytes(bytes, output),
            None => {
                let mut utf8 = CanonOutput::new();
                let mut i = begin;
                while i < end {
                    let (code_point, _) = read_utf_char(spec, &mut i, end);
                    append_utf8_value(code_point, &mut utf8);
                    i += 1;
                }
                append_raw_query_bytes(utf8.as_bytes(), output);
            }
        },
    }

    out_query.len = output.len() as i32 - out_query.begin;
}
