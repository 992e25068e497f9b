//! URL canonicalization.
//!
//! Per-component canonicalizers live in the submodules; this module holds
//! the whole-URL strategies (standard, file, path) and the component
//! replacement machinery. All canonicalizers are best-effort: failure
//! still appends a deterministic string and sets the output component, so
//! the boolean result can propagate partial success without aborting the
//! pipeline.

pub mod host;
pub mod ip;
pub mod parts;
pub mod path;
pub mod query;

pub use host::canonicalize_host;
pub use ip::{canonicalize_ip_address, find_ipv4_components};
pub use parts::{
    canonicalize_port, canonicalize_ref, canonicalize_scheme, canonicalize_user_info,
};
pub use path::{canonicalize_partial_path, canonicalize_path, file_canonicalize_path};
pub use query::canonicalize_query;

use crate::component::{Component, Parsed};
use crate::encoding::{append_utf8_escaped_char, check_spec_len, CanonOutput, Spec, SpecUnit};
use crate::parse::PORT_UNSPECIFIED;

/// An embedder-supplied output encoding for query strings, used for legacy
/// `<form>` submission charsets. When none is given, queries are encoded
/// as UTF-8.
pub trait CharsetConverter {
    /// Converts `input` to the target encoding, appending the raw encoded
    /// bytes to `output`. Unrepresentable characters may be written in any
    /// byte form the embedder chooses (such as HTML entities).
    fn convert(&self, input: &str, output: &mut Vec<u8>);
}

/// Returns the port implied by a canonical scheme, or [`PORT_UNSPECIFIED`].
pub(crate) fn default_port_for_scheme(scheme: &[u8]) -> i32 {
    match scheme {
        b"http" => 80,
        b"https" => 443,
        b"ftp" => 21,
        b"gopher" => 70,
        _ => PORT_UNSPECIFIED,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) enum Override<'a> {
    #[default]
    Keep,
    Remove,
    Set(&'a str),
}

/// A sparse overlay over a parsed URL for [`replace_components`].
///
/// Each of the eight components is either kept from the original spec,
/// removed from the output, or replaced with a new string. Setters follow
/// the builder style; a fresh `Replacements` keeps everything.
///
/// [`replace_components`]: crate::replace_components
///
/// # Examples
///
/// ```
/// use weburl::{parse_standard_url, replace_components, CanonOutput, Parsed, Replacements};
///
/// let spec = "http://www.google.com/foo/bar.html?foo#bar";
/// let parsed = parse_standard_url(spec);
///
/// let mut repl = Replacements::new();
/// repl.set_scheme("javascript")
///     .set_path("window.open('foo');")
///     .remove_query()
///     .remove_ref();
///
/// let mut output = CanonOutput::new();
/// let mut out_parsed = Parsed::default();
/// replace_components(spec, &parsed, &repl, None, &mut output, &mut out_parsed);
/// assert_eq!(output.as_str(), "javascript:window.open('foo');");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Replacements<'a> {
    pub(crate) scheme: Override<'a>,
    pub(crate) username: Override<'a>,
    pub(crate) password: Override<'a>,
    pub(crate) host: Override<'a>,
    pub(crate) port: Override<'a>,
    pub(crate) path: Override<'a>,
    pub(crate) query: Override<'a>,
    pub(crate) ref_: Override<'a>,
}

macro_rules! replacement_setters {
    ($(($field:ident, $set:ident, $remove:ident),)*) => {
        $(
            #[doc = concat!("Replaces the ", stringify!($field), " component. \
                An empty string removes it from the output.")]
            pub fn $set(&mut self, value: &'a str) -> &mut Self {
                self.$field = if value.is_empty() {
                    Override::Remove
                } else {
                    Override::Set(value)
                };
                self
            }

            #[doc = concat!("Removes the ", stringify!($field), " component \
                from the output.")]
            pub fn $remove(&mut self) -> &mut Self {
                self.$field = Override::Remove;
                self
            }
        )*
    };
}

impl<'a> Replacements<'a> {
    /// Creates an overlay that keeps every component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    replacement_setters! {
        (scheme, set_scheme, remove_scheme),
        (username, set_username, remove_username),
        (password, set_password, remove_password),
        (host, set_host, remove_host),
        (port, set_port, remove_port),
        (path, set_path, remove_path),
        (query, set_query, remove_query),
        (ref_, set_ref, remove_ref),
    }
}

/// One component's source: the spec it lives in and its range there. With
/// replacements in play, different components may come from different
/// strings.
#[derive(Clone, Copy)]
pub(crate) struct Piece<'a, U> {
    pub(crate) spec: &'a [U],
    pub(crate) comp: Component,
}

pub(crate) struct Sources<'a, U> {
    pub(crate) scheme: Piece<'a, U>,
    pub(crate) username: Piece<'a, U>,
    pub(crate) password: Piece<'a, U>,
    pub(crate) host: Piece<'a, U>,
    pub(crate) port: Piece<'a, U>,
    pub(crate) path: Piece<'a, U>,
    pub(crate) query: Piece<'a, U>,
    pub(crate) ref_: Piece<'a, U>,
}

impl<'a, U: SpecUnit> Sources<'a, U> {
    pub(crate) fn from_parsed(spec: &'a [U], parsed: &Parsed) -> Self {
        let piece = |comp| Piece { spec, comp };
        Self {
            scheme: piece(parsed.scheme),
            username: piece(parsed.username),
            password: piece(parsed.password),
            host: piece(parsed.host),
            port: piece(parsed.port),
            path: piece(parsed.path),
            query: piece(parsed.query),
            ref_: piece(parsed.ref_),
        }
    }
}

fn override_piece<'a>(piece: &mut Piece<'a, u8>, o: Override<'a>) {
    match o {
        Override::Keep => {}
        Override::Remove => {
            *piece = Piece {
                spec: b"",
                comp: Component::default(),
            };
        }
        Override::Set(s) => {
            *piece = Piece {
                spec: s.as_bytes(),
                comp: Component::new(0, s.len() as i32),
            };
        }
    }
}

fn apply_replacements<'a>(
    spec: &'a [u8],
    parsed: &Parsed,
    replacements: &Replacements<'a>,
) -> Sources<'a, u8> {
    let mut sources = Sources::from_parsed(spec, parsed);
    override_piece(&mut sources.scheme, replacements.scheme);
    override_piece(&mut sources.username, replacements.username);
    override_piece(&mut sources.password, replacements.password);
    override_piece(&mut sources.host, replacements.host);
    override_piece(&mut sources.port, replacements.port);
    override_piece(&mut sources.path, replacements.path);
    override_piece(&mut sources.query, replacements.query);
    override_piece(&mut sources.ref_, replacements.ref_);

    // The host is empty rather than absent when not present.
    if !sources.host.comp.is_valid() {
        sources.host.comp.len = 0;
    }
    sources
}

pub(crate) fn canonicalize_standard_url_from<U: SpecUnit>(
    sources: &Sources<'_, U>,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let mut success =
        canonicalize_scheme(sources.scheme.spec, sources.scheme.comp, output, &mut new_parsed.scheme);

    let have_authority = sources.username.comp.is_valid()
        || sources.password.comp.is_valid()
        || sources.host.comp.is_nonempty()
        || sources.port.comp.is_valid();

    if have_authority {
        if sources.scheme.comp.is_valid() {
            output.push_str("//");
        }
        success &= canonicalize_user_info(
            sources.username.spec,
            sources.username.comp,
            sources.password.spec,
            sources.password.comp,
            output,
            &mut new_parsed.username,
            &mut new_parsed.password,
        );
        success &= canonicalize_host(
            sources.host.spec,
            sources.host.comp,
            output,
            &mut new_parsed.host,
        );
        // A standard URL cannot have an empty host.
        if !sources.host.comp.is_nonempty() {
            success = false;
        }
        let default_port =
            default_port_for_scheme(new_parsed.scheme.slice(output.as_bytes()));
        success &= canonicalize_port(
            sources.port.spec,
            sources.port.comp,
            default_port,
            output,
            &mut new_parsed.port,
        );
    } else {
        new_parsed.username = Component::default();
        new_parsed.password = Component::default();
        new_parsed.host = Component::new(output.len() as i32, 0);
        new_parsed.port = Component::default();
        success = false;
    }

    if sources.path.comp.is_valid() {
        success &= canonicalize_path(
            sources.path.spec,
            sources.path.comp,
            output,
            &mut new_parsed.path,
        );
    } else if have_authority
        || sources.query.comp.is_valid()
        || sources.ref_.comp.is_valid()
    {
        // Something follows the path position, so make up the root path.
        new_parsed.path = Component::new(output.len() as i32, 1);
        output.push(b'/');
    } else {
        new_parsed.path = Component::default();
    }

    canonicalize_query(
        sources.query.spec,
        sources.query.comp,
        converter,
        output,
        &mut new_parsed.query,
    );
    // A bad ref does not keep the page from loading; ignore its result.
    canonicalize_ref(sources.ref_.spec, sources.ref_.comp, output, &mut new_parsed.ref_);

    success
}

pub(crate) fn canonicalize_file_url_from<U: SpecUnit>(
    sources: &Sources<'_, U>,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let mut success =
        canonicalize_scheme(sources.scheme.spec, sources.scheme.comp, output, &mut new_parsed.scheme);

    // File URLs have no userinfo or port, but they may have a host.
    new_parsed.username = Component::default();
    new_parsed.password = Component::default();
    new_parsed.port = Component::default();

    output.push_str("//");
    success &= canonicalize_host(
        sources.host.spec,
        sources.host.comp,
        output,
        &mut new_parsed.host,
    );
    success &= file_canonicalize_path(
        sources.path.spec,
        sources.path.comp,
        output,
        &mut new_parsed.path,
    );

    canonicalize_query(
        sources.query.spec,
        sources.query.comp,
        converter,
        output,
        &mut new_parsed.query,
    );
    canonicalize_ref(sources.ref_.spec, sources.ref_.comp, output, &mut new_parsed.ref_);

    success
}

pub(crate) fn canonicalize_path_url_from<U: SpecUnit>(
    sources: &Sources<'_, U>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let mut success =
        canonicalize_scheme(sources.scheme.spec, sources.scheme.comp, output, &mut new_parsed.scheme);

    new_parsed.username = Component::default();
    new_parsed.password = Component::default();
    new_parsed.host = Component::new(0, 0);
    new_parsed.port = Component::default();
    new_parsed.query = Component::default();

    if sources.path.comp.is_valid() {
        // The opaque body keeps printable ASCII verbatim (think
        // readability of javascript:), escaping only controls and
        // non-ASCII.
        new_parsed.path.begin = output.len() as i32;
        let spec = sources.path.spec;
        let end = sources.path.comp.end() as usize;
        let mut i = sources.path.comp.begin as usize;
        while i < end {
            let v = spec[i].value();
            if v < 0x20 || v >= 0x80 {
                success &= append_utf8_escaped_char(spec, &mut i, end, output);
            } else {
                output.push(v as u8);
            }
            i += 1;
        }
        new_parsed.path.len = output.len() as i32 - new_parsed.path.begin;
    } else {
        new_parsed.path = Component::default();
    }

    canonicalize_ref(sources.ref_.spec, sources.ref_.comp, output, &mut new_parsed.ref_);

    success
}

/// Canonicalizes a parsed standard (authority-based) URL.
pub fn canonicalize_standard_url<S: Spec + ?Sized>(
    spec: &S,
    parsed: &Parsed,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let units = spec.units();
    check_spec_len(units);
    canonicalize_standard_url_from(&Sources::from_parsed(units, parsed), converter, output, new_parsed)
}

/// Canonicalizes a parsed file URL.
pub fn canonicalize_file_url<S: Spec + ?Sized>(
    spec: &S,
    parsed: &Parsed,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let units = spec.units();
    check_spec_len(units);
    canonicalize_file_url_from(&Sources::from_parsed(units, parsed), converter, output, new_parsed)
}

/// Canonicalizes a parsed opaque (path) URL to `scheme:body[#ref]`.
pub fn canonicalize_path_url<S: Spec + ?Sized>(
    spec: &S,
    parsed: &Parsed,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let units = spec.units();
    check_spec_len(units);
    canonicalize_path_url_from(&Sources::from_parsed(units, parsed), output, new_parsed)
}

/// Canonicalizes a standard URL with some components replaced.
pub fn replace_standard_url(
    spec: &str,
    parsed: &Parsed,
    replacements: &Replacements<'_>,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let sources = apply_replacements(spec.as_bytes(), parsed, replacements);
    canonicalize_standard_url_from(&sources, converter, output, new_parsed)
}

/// Canonicalizes a file URL with some components replaced.
pub fn replace_file_url(
    spec: &str,
    parsed: &Parsed,
    replacements: &Replacements<'_>,
    converter: Option<&dyn CharsetConverter>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let sources = apply_replacements(spec.as_bytes(), parsed, replacements);
    canonicalize_file_url_from(&sources, converter, output, new_parsed)
}

/// Canonicalizes an opaque (path) URL with some components replaced.
pub fn replace_path_url(
    spec: &str,
    parsed: &Parsed,
    replacements: &Replacements<'_>,
    output: &mut CanonOutput,
    new_parsed: &mut Parsed,
) -> bool {
    let sources = apply_replacements(spec.as_bytes(), parsed, replacements);
    canonicalize_path_url_from(&sources, output, new_parsed)
}
