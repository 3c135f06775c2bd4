//! Percent-encoding at the query string boundary.
//!
//! Keys and values are kept decoded inside a [`Query`]. On the way out every
//! byte is escaped except the query characters that carry no structural
//! meaning inside a pair:
//!
//! ```text
//! A-Z a-z 0-9 - . _ ~ ! $ ' ( ) * + , ; : @ / ?
//! ```
//!
//! so `%`, `&`, `=`, `#`, space (as `%20`) and all non-ASCII bytes are
//! escaped.  Decoding is plain RFC 3986 `%XX` decoding; `+` is an ordinary
//! character in both directions.
//!
//! [`Query`]: ../struct.Query.html

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use super::{context::Context, error::Error};

/// Bytes escaped when encoding a query key or value.
pub(crate) const QUERY_ELEMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn encode_element(element: &str) -> Cow<'_, str> {
    utf8_percent_encode(element, QUERY_ELEMENT).into()
}

pub(crate) fn decode_element(element: &str, context: Context) -> Result<Cow<'_, str>, Error> {
    percent_decode_str(element)
        .decode_utf8()
        .map_err(|_| Error::CannotExpressAsUtf8(context))
}

/// Decode `element` when `decode` is set, otherwise hand it back verbatim.
pub(crate) fn decode_if(element: &str, decode: bool, context: Context) -> Result<String, Error> {
    if decode {
        Ok(decode_element(element, context)?.into_owned())
    } else {
        Ok(element.to_owned())
    }
}

/// Encode `element` when `encode` is set, otherwise hand it back verbatim.
pub(crate) fn encode_if(element: &str, encode: bool) -> Cow<'_, str> {
    if encode {
        encode_element(element)
    } else {
        Cow::Borrowed(element)
    }
}
