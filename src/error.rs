use super::context::Context;

/// This is the type of error returned by the parsing, construction and
/// mutation functions of this crate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input string does not match the grammar of the given component.
    #[error("{0} is not in the correct format")]
    Format(Context),

    /// A value handed to a constructor or setter cannot be accepted, such
    /// as a port outside `0..=65535` or a character the component's grammar
    /// does not allow.
    #[error("invalid {context}: {reason}")]
    Argument {
        /// The component the value was meant for.
        context: Context,
        /// What is wrong with the value.
        reason: String,
    },

    /// An index (path segment) or key (query pair) does not exist.
    #[error("{context} has no entry {key}")]
    Bounds {
        /// The component that was accessed.
        context: Context,
        /// The offending index or key, as text.
        key: String,
    },

    /// The bytes produced by percent-decoding a component are not valid
    /// UTF-8.
    #[error("percent-decoded {0} is not valid UTF-8")]
    CannotExpressAsUtf8(Context),
}

/// Coarse classification of an [`Error`].
///
/// [`Error`]: enum.Error.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input does not match the expected grammar.
    Format,
    /// A value has the wrong shape or is out of range.
    Argument,
    /// An indexed or keyed accessor referenced a missing entry.
    Bounds,
}

impl Error {
    pub(crate) fn argument<T>(context: Context, reason: T) -> Self
    where
        T: Into<String>,
    {
        Self::Argument {
            context,
            reason: reason.into(),
        }
    }

    pub(crate) fn bounds<T>(context: Context, key: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self::Bounds {
            context,
            key: key.to_string(),
        }
    }

    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format(_) | Error::CannotExpressAsUtf8(_) => ErrorKind::Format,
            Error::Argument { .. } => ErrorKind::Argument,
            Error::Bounds { .. } => ErrorKind::Bounds,
        }
    }

    /// The component the error refers to.
    #[must_use]
    pub fn context(&self) -> Context {
        match self {
            Error::Format(context) | Error::CannotExpressAsUtf8(context) => *context,
            Error::Argument { context, .. } | Error::Bounds { context, .. } => *context,
        }
    }
}
