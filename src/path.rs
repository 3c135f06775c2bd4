use std::{convert::TryFrom, fmt::Display, str::FromStr};

use super::{
    context::Context,
    error::Error,
    grammar::{named_captures, PATH_REGEX, SEGMENT_REGEX},
};

const SEPARATOR: char = '/';

/// The path component of a URI, held as an ordered list of segments.
///
/// Segments never contain the `/` separator.  Leading and trailing slashes
/// are special cases represented by extra empty segments at the beginning
/// and/or end of the path:
///
/// ```text
/// "foo/bar"   -> ["foo", "bar"]
/// "/foo/bar"  -> ["", "foo", "bar"]
/// "foo/bar/"  -> ["foo", "bar", ""]
/// "/"         -> [""]
/// ""          -> []
/// ```
///
/// # Examples
///
/// ```rust
/// use uniresid::Path;
///
/// # fn main() -> Result<(), uniresid::Error> {
/// let mut path = Path::parse("/usr/bin")?;
/// path.add("local/share")?;
/// path.remove(1)?;
/// assert_eq!("/bin/local/share", path.to_string());
/// assert_eq!(Ok("local"), path.get(2));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Construct a path from a sequence of segments.  Any segment holding a
    /// `/` is split, as if handed to [`add`].
    ///
    /// # Errors
    ///
    /// [`Error::Argument`] if a segment holds characters not allowed in a
    /// path.
    ///
    /// [`add`]: #method.add
    /// [`Error::Argument`]: enum.Error.html#variant.Argument
    pub fn forge<I, T>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut path = Self::default();
        path.add_all(segments)?;
        Ok(path)
    }

    /// Interpret the given string as a path, splitting it into segments.
    ///
    /// Matching stops at the first `?` or `#`, so the query and fragment of
    /// a URI reference are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Format`](enum.Error.html#variant.Format) if the string holds
    /// characters not allowed in a path, or empty segments other than a
    /// leading or trailing one.
    pub fn parse<T>(path_string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let captures =
            Self::validate_captures(path_string.as_ref()).ok_or(Error::Format(Context::Path))?;
        Ok(Self {
            segments: Self::split(captures.get("path").copied().unwrap_or_default()),
        })
    }

    /// Tests whether the given string matches the path grammar.
    #[must_use]
    pub fn validate<T>(path_string: T) -> bool
    where
        T: AsRef<str>,
    {
        PATH_REGEX.is_match(path_string.as_ref())
    }

    /// Like [`validate`], but hands back the `path` group of the match.
    ///
    /// [`validate`]: #method.validate
    #[must_use]
    pub fn validate_captures(
        path_string: &str,
    ) -> Option<std::collections::BTreeMap<&'static str, &str>> {
        named_captures(&PATH_REGEX, path_string)
    }

    /// Borrow the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Borrow the segment at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`](enum.Error.html#variant.Bounds) if there is no
    /// such segment.
    pub fn get(&self, index: usize) -> Result<&str, Error> {
        self.segments
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::bounds(Context::Path, index))
    }

    /// Append a segment.  A string holding `/` is split and each piece is
    /// appended in turn, so `add("a/b")` is the same as `add("a")` followed
    /// by `add("b")`.
    ///
    /// An empty segment can only start the path (making it absolute) or end
    /// it (a trailing `/`).  Nothing can be appended after a trailing `/`
    /// other than the root; replace the trailing empty segment with [`set`]
    /// instead.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if a piece
    /// holds characters not allowed in a path segment, or would leave an
    /// empty segment inside the path.  Nothing is appended in that case.
    ///
    /// [`set`]: #method.set
    pub fn add<T>(&mut self, segment: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        let mut segments = self.segments.clone();
        for piece in segment.as_ref().split(SEPARATOR) {
            segments.push(Self::check_segment(piece)?.to_owned());
        }
        self.segments = Self::check_layout(segments)?;
        Ok(())
    }

    /// Append every segment of a sequence, as [`add`] does for one.
    ///
    /// # Errors
    ///
    /// See [`add`]; segments before the offending one stay appended.
    ///
    /// [`add`]: #method.add
    pub fn add_all<I, T>(&mut self, segments: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        segments
            .into_iter()
            .try_for_each(|segment| self.add(segment))
    }

    /// Replace the segment at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`](enum.Error.html#variant.Bounds) if there is no
    /// such segment, [`Error::Argument`](enum.Error.html#variant.Argument)
    /// if the new segment holds `/` or other characters not allowed in a
    /// path segment, or is empty anywhere but the start or end of the path.
    pub fn set<T>(&mut self, index: usize, segment: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        let segment = Self::check_segment(segment.as_ref())?;
        if index >= self.segments.len() {
            return Err(Error::bounds(Context::Path, index));
        }
        let mut segments = self.segments.clone();
        segments[index] = segment.to_owned();
        self.segments = Self::check_layout(segments)?;
        Ok(())
    }

    /// Remove and return the segment at `index`, shifting the following
    /// segments down by one.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`](enum.Error.html#variant.Bounds) if there is no
    /// such segment, [`Error::Argument`](enum.Error.html#variant.Argument)
    /// if removing it would leave an empty segment inside the path, as in
    /// removing `a` from `/a/`.
    pub fn remove(&mut self, index: usize) -> Result<String, Error> {
        if index >= self.segments.len() {
            return Err(Error::bounds(Context::Path, index));
        }
        let mut segments = self.segments.clone();
        let removed = segments.remove(index);
        self.segments = Self::check_layout(segments)?;
        Ok(removed)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Determines if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Determines if the path begins with a slash.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self.segments.first(), Some(segment) if segment.is_empty())
    }

    /// Iterate over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    /// Join the segments with `/`.
    #[must_use]
    pub fn build(&self) -> String {
        match &*self.segments {
            // Special case: absolute but otherwise empty path.
            [segment] if segment.is_empty() => SEPARATOR.to_string(),
            segments => segments.join("/"),
        }
    }

    // ----------------------------------------------------------------------------------------------
    //                                         private methods
    // ----------------------------------------------------------------------------------------------
    fn split(path_string: &str) -> Vec<String> {
        match path_string {
            "" => vec![],
            "/" => vec![String::new()],
            path_string => path_string.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    // Empty segments stand for a leading or trailing `/` only.  Anywhere
    // else, or both at once in a two-segment path, they would build to `//`.
    fn check_layout(segments: Vec<String>) -> Result<Vec<String>, Error> {
        let last = segments.len().saturating_sub(1);
        let inner_empty = segments
            .iter()
            .enumerate()
            .any(|(index, segment)| segment.is_empty() && index != 0 && index != last);
        let double_slash = matches!(&*segments, [first, second] if first.is_empty() && second.is_empty());
        if inner_empty || double_slash {
            Err(Error::argument(
                Context::Path,
                "empty segments are only allowed at the start or end of a path",
            ))
        } else {
            Ok(segments)
        }
    }

    fn check_segment(segment: &str) -> Result<&str, Error> {
        if SEGMENT_REGEX.is_match(segment) {
            Ok(segment)
        } else {
            Err(Error::argument(
                Context::Path,
                format!("{segment:?} is not a valid path segment"),
            ))
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(path_string: &str) -> Result<Self, Self::Err> {
        Self::parse(path_string)
    }
}

impl TryFrom<&'_ str> for Path {
    type Error = Error;

    fn try_from(path_string: &'_ str) -> Result<Self, Self::Error> {
        Self::parse(path_string)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Path {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}
