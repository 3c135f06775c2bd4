/// This enumerates the various places where an error might occur parsing,
/// validating or building a URI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    /// This is the scheme component of the URI.
    Scheme,

    /// This is the whole Authority component of the URI.
    Authority,

    /// This is the `user_info` part of the Authority.
    UserInfo,

    /// This is the host name of the Authority.
    Host,

    /// This is the port number of the Authority.
    Port,

    /// This is the path component of the URI.
    Path,

    /// This is the query component of the URI.
    Query,

    /// This is the fragment component of the URI.
    Fragment,

    /// This is the URI as a whole.
    Uri,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Context::Scheme => "scheme",
            Context::Authority => "authority",
            Context::UserInfo => "user info",
            Context::Host => "host",
            Context::Port => "port",
            Context::Path => "path",
            Context::Query => "query",
            Context::Fragment => "fragment",
            Context::Uri => "URI",
        })
    }
}
