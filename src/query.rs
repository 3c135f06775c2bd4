use std::{convert::TryFrom, fmt::Display, str::FromStr};

use super::{
    codec::{decode_if, encode_if},
    context::Context,
    error::Error,
    grammar::{named_captures, QUERY_REGEX},
};

const PAIR_SEPARATOR: char = '&';
const VALUE_SEPARATOR: char = '=';

/// The query component of a URI, held as an ordered list of `key=value`
/// pairs with unique keys.
///
/// Keys and values are stored percent-decoded.  Parsing decodes and
/// building encodes, unless the caller switches that off.  Encoding escapes
/// every byte except `A-Z a-z 0-9 - . _ ~ ! $ ' ( ) * + , ; : @ / ?`, with a
/// space becoming `%20`; decoding leaves `+` alone.  Setting an existing
/// key replaces its value in place, so insertion order is kept.
///
/// # Examples
///
/// ```rust
/// use uniresid::Query;
///
/// # fn main() -> Result<(), uniresid::Error> {
/// let mut query = Query::parse("?a=1&b", true)?;
/// assert_eq!("", query.get("b", false)?);
/// query.set("c", "x y", true)?;
/// assert_eq!("?a=1&b=&c=x%20y", query.to_string());
/// assert_eq!("?a=1&b=&c=x y", query.build(false));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Construct a query from `(key, value)` pairs, percent-decoding each
    /// when `decode` is set, as [`set`] does.  Later pairs replace earlier
    /// ones with the same key.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if a key is
    /// empty,
    /// [`Error::CannotExpressAsUtf8`](enum.Error.html#variant.CannotExpressAsUtf8)
    /// if decoding produces invalid UTF-8.
    ///
    /// [`set`]: #method.set
    pub fn forge<I, K, V>(pairs: I, decode: bool) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            query.set(key, value.as_ref(), decode)?;
        }
        Ok(query)
    }

    /// Interpret the given string (with or without its leading `?`) as a
    /// query, percent-decoding keys and values when `decode` is set.
    ///
    /// A pair without `=` gets an empty value; later pairs replace earlier
    /// ones with the same key.
    ///
    /// # Errors
    ///
    /// [`Error::Format`](enum.Error.html#variant.Format) if the string holds
    /// characters not allowed in a query,
    /// [`Error::CannotExpressAsUtf8`](enum.Error.html#variant.CannotExpressAsUtf8)
    /// if decoding produces invalid UTF-8.
    pub fn parse<T>(query_string: T, decode: bool) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in Self::parse_as_pairs(query_string, decode)? {
            query.insert(key, value);
        }
        Ok(query)
    }

    /// Like [`parse`], but returns every pair in order without merging
    /// duplicate keys, and without rejecting empty keys.
    ///
    /// # Errors
    ///
    /// See [`parse`].
    ///
    /// [`parse`]: #method.parse
    pub fn parse_as_pairs<T>(query_string: T, decode: bool) -> Result<Vec<(String, String)>, Error>
    where
        T: AsRef<str>,
    {
        let captures = Self::validate_captures(query_string.as_ref())
            .ok_or(Error::Format(Context::Query))?;
        match captures.get("query").copied().unwrap_or_default() {
            "" => Ok(vec![]),
            query => query
                .split(PAIR_SEPARATOR)
                .map(|pair| -> Result<(String, String), Error> {
                    let (key, value) = pair.split_once(VALUE_SEPARATOR).unwrap_or((pair, ""));
                    Ok((
                        decode_if(key, decode, Context::Query)?,
                        decode_if(value, decode, Context::Query)?,
                    ))
                })
                .collect(),
        }
    }

    /// Tests whether the given string matches the query grammar.
    #[must_use]
    pub fn validate<T>(query_string: T) -> bool
    where
        T: AsRef<str>,
    {
        QUERY_REGEX.is_match(query_string.as_ref())
    }

    /// Like [`validate`], but hands back the `query` group of the match.
    ///
    /// [`validate`]: #method.validate
    #[must_use]
    pub fn validate_captures(
        query_string: &str,
    ) -> Option<std::collections::BTreeMap<&'static str, &str>> {
        named_captures(&QUERY_REGEX, query_string)
    }

    /// Replace every pair with the given ones, percent-decoding each.  This
    /// is [`forge`] with decoding, applied to an existing query.
    ///
    /// [`forge`]: #method.forge
    ///
    /// # Errors
    ///
    /// See [`set`](#method.set); the query is left empty on error.
    pub fn load<I, K, V>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.pairs.clear();
        let loaded = pairs
            .into_iter()
            .try_for_each(|(key, value)| self.set(key, value.as_ref(), true));
        if loaded.is_err() {
            self.pairs.clear();
        }
        loaded
    }

    /// Set `key` to `value`, decoding both first when `decode` is set.  A
    /// `None` value is stored as the empty string.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if the key is
    /// empty,
    /// [`Error::CannotExpressAsUtf8`](enum.Error.html#variant.CannotExpressAsUtf8)
    /// if decoding produces invalid UTF-8.
    pub fn set<'v, K, V>(&mut self, key: K, value: V, decode: bool) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: Into<Option<&'v str>>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::argument(Context::Query, "keys must not be empty"));
        }
        let key = decode_if(key, decode, Context::Query)?;
        let value = decode_if(value.into().unwrap_or_default(), decode, Context::Query)?;
        self.insert(key, value);
        Ok(())
    }

    /// Return the value stored for `key` (given decoded), percent-encoded
    /// when `encode` is set.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`](enum.Error.html#variant.Bounds) if there is no
    /// such key.
    pub fn get<K>(&self, key: K, encode: bool) -> Result<String, Error>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        self.position(key)
            .map(|index| encode_if(&self.pairs[index].1, encode).into_owned())
            .ok_or_else(|| Error::bounds(Context::Query, format!("{key:?}")))
    }

    /// Borrow every pair, decoded, in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Determines if there is a pair for `key`.
    #[must_use]
    pub fn has<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.position(key.as_ref()).is_some()
    }

    /// Remove the pair for `key`, returning its value.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`](enum.Error.html#variant.Bounds) if there is no
    /// such key.
    pub fn remove<K>(&mut self, key: K) -> Result<String, Error>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let index = self
            .position(key)
            .ok_or_else(|| Error::bounds(Context::Query, format!("{key:?}")))?;
        Ok(self.pairs.remove(index).1)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Determines if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Render the query as `?key=value&...`, percent-encoding keys and
    /// values when `encode` is set.  Every pair gets its `=`, even with an
    /// empty value.  An empty query renders as the empty string.
    #[must_use]
    pub fn build(&self, encode: bool) -> String {
        let query = self
            .pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}{VALUE_SEPARATOR}{}",
                    encode_if(key, encode),
                    encode_if(value, encode)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    // ----------------------------------------------------------------------------------------------
    //                                         private methods
    // ----------------------------------------------------------------------------------------------
    fn position(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|(existing, _)| existing == key)
    }

    fn insert(&mut self, key: String, value: String) {
        match self.position(&key) {
            Some(index) => self.pairs[index].1 = value,
            None => self.pairs.push((key, value)),
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build(true))
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(query_string: &str) -> Result<Self, Self::Err> {
        Self::parse(query_string, true)
    }
}

impl TryFrom<&'_ str> for Query {
    type Error = Error;

    fn try_from(query_string: &'_ str) -> Result<Self, Self::Error> {
        Self::parse(query_string, true)
    }
}

impl IntoIterator for Query {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
