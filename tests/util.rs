use weburl::{add_standard_scheme, find_and_compare_scheme, is_standard, Component};

#[test]
fn find_and_compare() {
    // Scheme found and matching.
    let (matches, scheme) = find_and_compare_scheme("http://www.com/", "http");
    assert!(matches);
    assert_eq!(scheme, Component::new(0, 4));

    // Scheme found but different.
    let (matches, scheme) = find_and_compare_scheme("http://www.com/", "https");
    assert!(!matches);
    assert_eq!(scheme, Component::new(0, 4));

    // No scheme at all.
    let (matches, scheme) = find_and_compare_scheme("httpfoobar", "http");
    assert!(!matches);
    assert_eq!(scheme, Component::default());

    // An empty scheme matches the empty string.
    let (matches, scheme) = find_and_compare_scheme(":foo.com/", "");
    assert!(matches);
    assert_eq!(scheme, Component::new(0, 0));

    // But no scheme does not.
    let (matches, scheme) = find_and_compare_scheme("", "");
    assert!(!matches);
    assert_eq!(scheme, Component::default());

    // Comparison is case-insensitive on the input side.
    let (matches, _) = find_and_compare_scheme("HTTP://www.com/", "http");
    assert!(matches);
}

#[test]
fn standard_schemes() {
    assert!(is_standard("http://foo/"));
    assert!(is_standard("HTTPS://foo/"));
    assert!(is_standard("file:///C:/"));
    assert!(is_standard("ftp://foo/"));
    assert!(is_standard("gopher://foo/"));
    assert!(!is_standard("foo://bar/"));
    assert!(!is_standard("javascript:alert(1)"));
    assert!(!is_standard("no-scheme-here"));
}

#[test]
fn added_schemes() {
    // Registration happens in this one test so the order of checks is
    // under our control; the registry is process-wide.
    assert!(!is_standard("testscheme://foo/"));
    add_standard_scheme("testscheme");
    assert!(is_standard("testscheme://foo/"));
    assert!(is_standard("TESTSCHEME://foo/"));

    // Adding the empty string is a no-op.
    add_standard_scheme("");
    assert!(!is_standard("://foo/"));
}

#[test]
fn wide_scheme_lookup() {
    let wide: Vec<u16> = "HTTP://www.com/".encode_utf16().collect();
    let (matches, scheme) = find_and_compare_scheme(&wide[..], "http");
    assert!(matches);
    assert_eq!(scheme, Component::new(0, 4));
    assert!(is_standard(&wide[..]));
}
