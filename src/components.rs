use std::fmt::Display;

use super::{authority::Authority, path::Path, query::Query};

/// One sub-component of a [`Components`] map: either the raw text still to
/// be parsed, or an already constructed value.
///
/// [`Components`]: struct.Components.html
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part<T> {
    /// Text in the component's own grammar, parsed when the URI is forged.
    Raw(String),

    /// A constructed value, taken as it is.
    Typed(T),
}

impl<T> Part<T> {
    /// Borrow the raw text, if this is the raw form.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Part::Raw(raw) => Some(raw),
            Part::Typed(_) => None,
        }
    }

    /// Borrow the constructed value, if this is the typed form.
    #[must_use]
    pub fn as_typed(&self) -> Option<&T> {
        match self {
            Part::Raw(_) => None,
            Part::Typed(typed) => Some(typed),
        }
    }
}

impl<T> Default for Part<T>
where
    T: Default,
{
    fn default() -> Self {
        Part::Typed(T::default())
    }
}

impl<T> Display for Part<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::Raw(raw) => f.write_str(raw),
            Part::Typed(typed) => typed.fmt(f),
        }
    }
}

impl<T> From<&str> for Part<T> {
    fn from(raw: &str) -> Self {
        Part::Raw(raw.to_owned())
    }
}

impl<T> From<String> for Part<T> {
    fn from(raw: String) -> Self {
        Part::Raw(raw)
    }
}

impl From<Authority> for Part<Authority> {
    fn from(authority: Authority) -> Self {
        Part::Typed(authority)
    }
}

impl From<Path> for Part<Path> {
    fn from(path: Path) -> Self {
        Part::Typed(path)
    }
}

impl From<Query> for Part<Query> {
    fn from(query: Query) -> Self {
        Part::Typed(query)
    }
}

/// The five components of a URI, as produced by [`Uri::parse_components`]
/// and consumed by [`Uri::forge`].
///
/// Missing components can be left to [`Default`], which is the empty scheme,
/// path, query and fragment, and no authority.  An authority of `Some` is
/// always rendered, with its `//`, even when empty (as in `file:///etc`).
///
/// ```rust
/// use uniresid::{Authority, Components, Path, Uri};
///
/// # fn main() -> Result<(), uniresid::Error> {
/// let uri = Uri::forge(Components {
///     scheme: "http".into(),
///     authority: Some(Authority::forge("host", 0, "")?.into()),
///     path: Path::forge(["p"])?.into(),
///     ..Components::default()
/// })?;
/// assert_eq!("http://host/p", uri.to_string());
/// # Ok(())
/// # }
/// ```
///
/// [`Uri::parse_components`]: struct.Uri.html#method.parse_components
/// [`Uri::forge`]: struct.Uri.html#method.forge
/// [`Default`]: https://doc.rust-lang.org/std/default/trait.Default.html
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Components {
    /// The scheme, without its `:`.
    pub scheme: String,
    /// The authority, with or without its leading `//`; `None` when the
    /// URI has none.
    pub authority: Option<Part<Authority>>,
    /// The path; absolute paths keep their leading `/`.
    pub path: Part<Path>,
    /// The query, with or without its leading `?`.  One leading `?` is
    /// dropped, so a first key that starts with `?` needs the prefix.
    pub query: Part<Query>,
    /// The fragment, without its `#`.
    pub fragment: String,
}
