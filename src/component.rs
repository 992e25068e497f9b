//! Component ranges over a URL spec.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A range of characters within a URL spec.
///
/// A component is a `(begin, len)` pair measured in code units of the spec
/// it was parsed from. A length of `-1` means the component is not present
/// in the spec at all, which is distinct from a present-but-empty component
/// with a length of `0`. The begin offset is a valid index into the spec
/// even when the component is absent (it is nominally `0`).
///
/// # Examples
///
/// ```
/// use weburl::{parse_standard_url, Component};
///
/// let spec = "http://example.com/path";
/// let parsed = parse_standard_url(spec);
/// assert_eq!(parsed.path, Component::new(18, 5));
/// assert_eq!(parsed.path.slice(spec.as_bytes()), b"/path");
/// assert!(!parsed.query.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    /// Index of the first code unit of the component.
    pub begin: i32,
    /// Number of code units in the component, or `-1` if not present.
    pub len: i32,
}

impl Component {
    /// Creates a component from an offset and a length.
    #[inline]
    #[must_use]
    pub const fn new(begin: i32, len: i32) -> Self {
        Self { begin, len }
    }

    /// Creates a component covering `[begin, end)`.
    #[inline]
    #[must_use]
    pub const fn range(begin: i32, end: i32) -> Self {
        Self {
            begin,
            len: end - begin,
        }
    }

    /// Returns the offset one past the last code unit, treating an absent
    /// component as empty.
    #[inline]
    #[must_use]
    pub const fn end(self) -> i32 {
        if self.len > 0 {
            self.begin + self.len
        } else {
            self.begin
        }
    }

    /// Checks whether the component is present in the spec. Present
    /// components may still be empty.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.len >= 0
    }

    /// Checks whether the component is present and nonempty.
    #[inline]
    #[must_use]
    pub const fn is_nonempty(self) -> bool {
        self.len > 0
    }

    /// Returns the sub-slice of `spec` this component covers.
    ///
    /// An absent component yields an empty slice.
    #[must_use]
    pub fn slice<U>(self, spec: &[U]) -> &[U] {
        &spec[self.begin as usize..self.end() as usize]
    }
}

impl Default for Component {
    /// An absent component.
    #[inline]
    fn default() -> Self {
        Self { begin: 0, len: -1 }
    }
}

/// The output of URL parsing: one [`Component`] per piece of the spec.
///
/// All components refer back into the spec that was parsed; the parsed
/// structure does not own any character storage. Absent components have a
/// length of `-1`, except `host`, which is reported as present-but-empty
/// (`len == 0`) for hierarchical URLs that carry no authority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parsed {
    /// The scheme, not including the trailing colon.
    pub scheme: Component,
    /// The username, between the end of the scheme separator and the first
    /// colon of the userinfo.
    pub username: Component,
    /// The password, between the first colon of the userinfo and the `@`.
    pub password: Component,
    /// The host. Square brackets around an IPv6 literal are included.
    pub host: Component,
    /// The port digits, not including the preceding colon.
    pub port: Component,
    /// The path, including the leading slash and any parameters.
    pub path: Component,
    /// The query, not including the leading `?`.
    pub query: Component,
    /// The ref (fragment), not including the leading `#`.
    pub ref_: Component,
}

impl Parsed {
    /// Returns the end offset of the last present component, which for a
    /// canonical URL is its total length.
    #[must_use]
    pub fn length(&self) -> i32 {
        // Components are in spec order, so the first present one from the
        // back determines the overall length.
        let all = [
            self.ref_,
            self.query,
            self.path,
            self.port,
            self.host,
            self.password,
            self.username,
            self.scheme,
        ];
        for comp in all {
            if comp.is_valid() {
                return comp.end();
            }
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_end_and_presence() {
        assert_eq!(Component::default(), Component::new(0, -1));
        assert!(!Component::default().is_valid());
        assert_eq!(Component::new(3, -1).end(), 3);
        assert_eq!(Component::new(3, 0).end(), 3);
        assert_eq!(Component::new(3, 4).end(), 7);
        assert!(Component::new(3, 0).is_valid());
        assert!(!Component::new(3, 0).is_nonempty());
    }

    #[test]
    fn parsed_length() {
        let mut parsed = Parsed::default();
        assert_eq!(parsed.length(), 0);
        parsed.scheme = Component::new(0, 4);
        parsed.host = Component::new(7, 3);
        assert_eq!(parsed.length(), 10);
        parsed.ref_ = Component::new(12, 2);
        assert_eq!(parsed.length(), 14);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let component = Component::new(3, 7);
        let json = serde_json::to_string(&component).unwrap();
        assert_eq!(serde_json::from_str::<Component>(&json).unwrap(), component);

        let mut parsed = Parsed::default();
        parsed.scheme = Component::new(0, 4);
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(serde_json::from_str::<Parsed>(&json).unwrap(), parsed);
    }
}
