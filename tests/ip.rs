use weburl::canon::{canonicalize_ip_address, find_ipv4_components};
use weburl::{canonicalize, CanonOutput, Component, Parsed};

/// Runs the IP canonicalizer over a whole host string. Returns the
/// canonical text when the host is an IP literal.
#[track_caller]
fn canon_ip(host: &str) -> Option<String> {
    let mut output = CanonOutput::new();
    let mut out_host = Component::default();
    let component = Component::new(0, host.len() as i32);
    canonicalize_ip_address(host.as_bytes(), component, &mut output, &mut out_host)
        .then(|| output.into_string())
}

#[test]
fn ipv4() {
    // Dotted decimal is already canonical.
    assert_eq!(canon_ip("192.168.9.1").as_deref(), Some("192.168.9.1"));
    assert_eq!(canon_ip("0.0.0.0").as_deref(), Some("0.0.0.0"));
    assert_eq!(canon_ip("255.255.255.255").as_deref(), Some("255.255.255.255"));
    // A single trailing dot is tolerated and dropped.
    assert_eq!(canon_ip("1.2.3.4.").as_deref(), Some("1.2.3.4"));

    // Hex, octal and decimal bases per component.
    assert_eq!(canon_ip("0x7f.1").as_deref(), Some("127.0.0.1"));
    assert_eq!(canon_ip("0XAB.0.1.2").as_deref(), Some("171.0.1.2"));
    assert_eq!(canon_ip("0177.0.0.1").as_deref(), Some("127.0.0.1"));

    // Fewer than four components fill out from the last value.
    assert_eq!(canon_ip("16843009").as_deref(), Some("1.1.1.1"));
    assert_eq!(canon_ip("127.1").as_deref(), Some("127.0.0.1"));
    assert_eq!(canon_ip("192.168.257").as_deref(), Some("192.168.1.1"));

    // Values truncate to their octet widths.
    assert_eq!(canon_ip("300.1.1.1").as_deref(), Some("44.1.1.1"));
    assert_eq!(canon_ip("4294967296").as_deref(), Some("0.0.0.0"));

    // Not IPv4 addresses at all.
    assert_eq!(canon_ip("www.google.com"), None);
    assert_eq!(canon_ip("192.168.9.1.2"), None);
    assert_eq!(canon_ip("192.168.m.1"), None);
    assert_eq!(canon_ip("1..2.3"), None);
    assert_eq!(canon_ip(""), None);
    assert_eq!(canon_ip("."), None);
}

#[test]
fn ipv4_components() {
    let host = "1.2.3.4";
    let mut components = [Component::default(); 4];
    assert!(find_ipv4_components(
        host.as_bytes(),
        Component::new(0, host.len() as i32),
        &mut components,
    ));
    assert_eq!(components[0], Component::new(0, 1));
    assert_eq!(components[1], Component::new(2, 1));
    assert_eq!(components[2], Component::new(4, 1));
    assert_eq!(components[3], Component::new(6, 1));

    let host = "1.2";
    let mut components = [Component::default(); 4];
    assert!(find_ipv4_components(
        host.as_bytes(),
        Component::new(0, host.len() as i32),
        &mut components,
    ));
    assert_eq!(components[0], Component::new(0, 1));
    assert_eq!(components[1], Component::new(2, 1));
    assert!(!components[2].is_valid());
    assert!(!components[3].is_valid());
}

#[test]
fn ipv6() {
    // Well-shaped literals are copied through verbatim, brackets and all;
    // no zero-compression or case normalization is applied.
    assert_eq!(canon_ip("[2001:db8::1]").as_deref(), Some("[2001:db8::1]"));
    assert_eq!(canon_ip("[::1]").as_deref(), Some("[::1]"));
    assert_eq!(canon_ip("[ABCD::EF01]").as_deref(), Some("[ABCD::EF01]"));
    // An embedded IPv4 tail needs exactly three dots.
    assert_eq!(canon_ip("[::ffff:1.2.3.4]").as_deref(), Some("[::ffff:1.2.3.4]"));
    assert_eq!(canon_ip("[::ffff:1.2.3]"), None);

    // Shape violations.
    assert_eq!(canon_ip("[12345::1]"), None); // five hex digits in a run
    assert_eq!(canon_ip("[1:2:3:4:5:6:7:8:9]"), None); // too many colons
    assert_eq!(canon_ip("[61:27]"), None); // too few colons
    assert_eq!(canon_ip("[::1%25eth0]"), None); // invalid character
    assert_eq!(canon_ip("[:.:]"), None); // dot without digits
    assert_eq!(canon_ip("::1"), None); // missing brackets
    assert_eq!(canon_ip("[::1"), None);
}

#[test]
fn ip_hosts_in_urls() {
    #[track_caller]
    fn canon_url(input: &str) -> String {
        let mut output = CanonOutput::new();
        let mut parsed = Parsed::default();
        assert!(canonicalize(input, None, &mut output, &mut parsed));
        output.into_string()
    }

    assert_eq!(canon_url("http://192.168.9.1/"), "http://192.168.9.1/");
    assert_eq!(canon_url("http://0x7f.1/"), "http://127.0.0.1/");
    assert_eq!(canon_url("http://[2001:db8::1]/x"), "http://[2001:db8::1]/x");
    // Five components is not an IP; it canonicalizes as a registered name.
    assert_eq!(canon_url("http://192.168.9.1.2/"), "http://192.168.9.1.2/");
}
