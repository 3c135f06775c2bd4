//! Anchored regular grammars for the URI and its components.
//!
//! The character classes follow RFC 3986 section 3 closely, with the
//! simplifications that the components of this crate rely on: hosts are
//! matched by shape only, and `user_info` is any run of characters that
//! cannot end the authority.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

const SCHEME: &str = r"[A-Za-z][A-Za-z0-9+\-.]*";

// Lazy: the first `@` ends the user info, and it can never swallow a path,
// query or fragment delimiter.
const USER_INFO: &str = r"[^/?#@]+";

const PCT_ENCODED: &str = "%[0-9A-Fa-f]{2}";

const HOST: &str = concat!(
    r"(?:[A-Za-z0-9\-._~]|%[0-9A-Fa-f]{2})+",
    r"|\[[A-Fa-f0-9:.]+\]",
    r"|\[v[A-Fa-f0-9][A-Za-z0-9\-._~!$&'()*+,;=:]+\]",
);

// Decimal 1..=65535 without leading zeros, so the number stored for a port
// always renders back to the same text.
const PORT: &str = concat!(
    "6553[0-5]|655[0-2][0-9]|65[0-4][0-9]{2}|6[0-4][0-9]{3}",
    "|[1-5][0-9]{4}|[1-9][0-9]{0,3}",
);

const SEGMENT_CHAR: &str = r"[A-Za-z0-9\-._~!$&'()*+,;=:@]";

const QUERY_CHAR: &str = r"[A-Za-z0-9\-._~!$'()*+,;:@/?]";

const FRAGMENT_CHAR: &str = r"[A-Za-z0-9\-._~!$&'()*+,;=:@/?]";

/// A percent-encoded UTF-8 sequence.  Query keys and values are decoded
/// into strings, so only escapes that decode to valid UTF-8 are accepted.
fn utf8_escape() -> String {
    let tail = "%[89ABab][0-9A-Fa-f]";
    [
        "%[0-7][0-9A-Fa-f]".to_owned(),
        format!("%(?:[Cc][2-9A-Fa-f]|[Dd][0-9A-Fa-f]){tail}"),
        format!("%[Ee]0%[ABab][0-9A-Fa-f]{tail}"),
        format!("%[Ee][1-9A-Ca-cEeFf]{tail}{tail}"),
        format!("%[Ee][Dd]%[89][0-9A-Fa-f]{tail}"),
        format!("%[Ff]0%[9ABab][0-9A-Fa-f]{tail}{tail}"),
        format!("%[Ff][1-3]{tail}{tail}{tail}"),
        format!("%[Ff]4%8[0-9A-Fa-f]{tail}{tail}"),
    ]
    .join("|")
}

fn segment() -> String {
    format!("(?:{SEGMENT_CHAR}|{PCT_ENCODED})+")
}

fn fragment() -> String {
    format!("(?:{FRAGMENT_CHAR}|{PCT_ENCODED})*")
}

fn pair() -> String {
    let query_char = format!("(?:{QUERY_CHAR}|{})", utf8_escape());
    format!("{query_char}*(?:={query_char}*)?")
}

fn query() -> String {
    let pair = pair();
    format!("{pair}(?:&{pair})*")
}

fn authority() -> String {
    format!("(?:(?P<userinfo>{USER_INFO})@)?(?P<host>{HOST})?(?::(?P<port>{PORT}))?")
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(error) => unreachable!("grammar pattern failed to compile: {error}"),
    }
}

pub(crate) static SCHEME_REGEX: Lazy<Regex> = Lazy::new(|| compile(&format!("^{SCHEME}$")));

pub(crate) static USER_INFO_REGEX: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^(?:{USER_INFO})?$")));

pub(crate) static HOST_REGEX: Lazy<Regex> = Lazy::new(|| compile(&format!("^(?:{HOST})?$")));

pub(crate) static SEGMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^(?:{segment})?$", segment = segment())));

pub(crate) static FRAGMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^{fragment}$", fragment = fragment())));

pub(crate) static AUTHORITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        "^(?:(?://)?{authority})?(?:/|\\?|#|$)",
        authority = authority()
    ))
});

pub(crate) static PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^(?P<path>/?(?:{segment}/?)*)(?:\\?|#|$)", segment = segment())));

pub(crate) static QUERY_REGEX: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^\\??(?P<query>{query})(?:#|$)", query = query())));

// After an authority the path is either empty or absolute; without one it
// may be absolute, rootless or empty.
pub(crate) static URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        concat!(
            "^(?:(?P<scheme>{scheme}):)?",
            "(?://(?P<authority>{authority_body})(?P<abempty>(?:/(?:{segment}/?)*)?)",
            "|(?P<path>/?(?:{segment}/?)*))",
            "(?:\\?(?P<query>{query}))?",
            "(?:#(?P<fragment>{fragment}))?$",
        ),
        scheme = SCHEME,
        authority_body = format!("(?:{USER_INFO}@)?(?:{HOST})?(?::(?:{PORT}))?"),
        segment = segment(),
        query = query(),
        fragment = fragment(),
    ))
});

/// The named groups that took part in matching `regex` against `input`, or
/// `None` if `input` doesn't match.
pub(crate) fn named_captures<'t>(
    regex: &'static Regex,
    input: &'t str,
) -> Option<BTreeMap<&'static str, &'t str>> {
    let captures = regex.captures(input)?;
    Some(
        regex
            .capture_names()
            .flatten()
            .filter_map(|name| captures.name(name).map(|value| (name, value.as_str())))
            .collect(),
    )
}
