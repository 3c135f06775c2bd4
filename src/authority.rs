use std::{convert::TryFrom, fmt::Display, str::FromStr};

use super::{
    context::Context,
    error::Error,
    grammar::{named_captures, AUTHORITY_REGEX, HOST_REGEX, USER_INFO_REGEX},
};

/// The port substituted for an unset port when a caller asks for it.
pub const DEFAULT_PORT: u16 = 80;

/// This is the optional part of a URI which governs the URI's namespace.  It
/// typically contains a host name or IP address, and may also include a port
/// number and/or `user_info` component.
///
/// The host is kept exactly as written, so IPv6 and IPvFuture literals keep
/// their square brackets.  A port of `0` means the port is unset.
///
/// # Examples
///
/// ## Parsing an Authority into its components
///
/// ```rust
/// use uniresid::Authority;
///
/// # fn main() -> Result<(), uniresid::Error> {
/// let authority = Authority::parse("nobody@www.example.com:8080")?;
/// assert_eq!("nobody", authority.user_info());
/// assert_eq!("www.example.com", authority.host());
/// assert_eq!(8080, authority.port());
/// # Ok(())
/// # }
/// ```
///
/// ## Generating an Authority from its components
///
/// ```rust
/// use uniresid::Authority;
///
/// # fn main() -> Result<(), uniresid::Error> {
/// let mut authority = Authority::default();
/// authority.set_user_info("nobody")?;
/// authority.set_host("www.example.com")?;
/// authority.set_port(8080)?;
/// assert_eq!("//nobody@www.example.com:8080", authority.to_string());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Authority {
    user_info: String,
    host: String,
    port: u16,
    default_port: u16,
}

/// Switches for [`Authority::build`].
///
/// [`Authority::build`]: struct.Authority.html#method.build
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildOptions {
    /// Emit the `user_info` part (it is left out anyway when empty).
    pub user_info: bool,
    /// Emit the port part.
    pub port: bool,
    /// Leave an unset port out instead of rendering the default port.
    pub omit_default_port: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            user_info: true,
            port: true,
            omit_default_port: true,
        }
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self {
            user_info: String::new(),
            host: String::new(),
            port: 0,
            default_port: DEFAULT_PORT,
        }
    }
}

impl Authority {
    /// Construct an Authority directly from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] if the host or `user_info` contain
    /// characters their grammar doesn't allow, or if the port is outside
    /// `0..=65535`.
    ///
    /// [`Error::Argument`]: enum.Error.html#variant.Argument
    pub fn forge<H, P, U>(host: H, port: P, user_info: U) -> Result<Self, Error>
    where
        H: AsRef<str>,
        P: TryInto<u16> + Display + Copy,
        U: AsRef<str>,
    {
        let mut authority = Self::default();
        authority.set_host(host)?;
        authority.set_port(port)?;
        authority.set_user_info(user_info)?;
        Ok(authority)
    }

    /// Interpret the given string as the Authority component of a URI,
    /// separating its various subcomponents, returning an `Authority` value
    /// containing them.
    ///
    /// A leading `//` is accepted, and anything from the first `/`, `?` or
    /// `#` after the authority on is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the string doesn't match the authority
    /// grammar.  A port must be written as a decimal in `1..=65535` without
    /// leading zeros, so that it renders back unchanged; `:0`, `:080` and
    /// `:65536` are format errors.
    ///
    /// [`Error::Format`]: enum.Error.html#variant.Format
    pub fn parse<T>(authority_string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let captures = Self::validate_captures(authority_string.as_ref())
            .ok_or(Error::Format(Context::Authority))?;
        let port = match captures.get("port") {
            Some(port) => Self::parse_port(port)?,
            None => 0,
        };
        Ok(Self {
            user_info: captures.get("userinfo").copied().unwrap_or_default().to_owned(),
            host: captures.get("host").copied().unwrap_or_default().to_owned(),
            port,
            default_port: DEFAULT_PORT,
        })
    }

    /// Tests whether the given string matches the authority grammar.
    #[must_use]
    pub fn validate<T>(authority_string: T) -> bool
    where
        T: AsRef<str>,
    {
        AUTHORITY_REGEX.is_match(authority_string.as_ref())
    }

    /// Like [`validate`], but hands back the named groups (`userinfo`,
    /// `host`, `port`) that took part in the match.
    ///
    /// [`validate`]: #method.validate
    #[must_use]
    pub fn validate_captures(
        authority_string: &str,
    ) -> Option<std::collections::BTreeMap<&'static str, &str>> {
        named_captures(&AUTHORITY_REGEX, authority_string)
    }

    /// Borrow the `user_info` part of the Authority.
    #[must_use]
    pub fn user_info(&self) -> &str {
        &self.user_info
    }

    /// Change the `user_info` part of the Authority.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if the value
    /// contains `/`, `?`, `#` or `@`.
    pub fn set_user_info<T>(&mut self, user_info: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        let user_info = user_info.as_ref();
        if !USER_INFO_REGEX.is_match(user_info) {
            return Err(Error::argument(
                Context::UserInfo,
                format!("{user_info:?} contains a delimiter character"),
            ));
        }
        self.user_info = user_info.to_owned();
        Ok(())
    }

    /// Borrow the host part of the Authority.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Change the host part of the Authority.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if the value is
    /// neither a registered name, an IPv4 address nor a bracketed IP literal.
    pub fn set_host<T>(&mut self, host: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        let host = host.as_ref();
        if !HOST_REGEX.is_match(host) {
            return Err(Error::argument(
                Context::Host,
                format!("{host:?} is not a valid host"),
            ));
        }
        self.host = host.to_owned();
        Ok(())
    }

    /// Return the port, `0` meaning unset.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the port, substituting the default port when it is unset.
    #[must_use]
    pub fn port_or_default(&self) -> u16 {
        match self.port {
            0 => self.default_port,
            port => port,
        }
    }

    /// Change the port.  `0` unsets it.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`](enum.Error.html#variant.Argument) if the value is
    /// outside `0..=65535`; the previous port is kept.
    pub fn set_port<P>(&mut self, port: P) -> Result<(), Error>
    where
        P: TryInto<u16> + Display + Copy,
    {
        self.port = port.try_into().map_err(|_| Self::port_out_of_range(port))?;
        Ok(())
    }

    /// Return the port substituted by [`port_or_default`] for an unset port.
    ///
    /// [`port_or_default`]: #method.port_or_default
    #[must_use]
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Change the port substituted for an unset port.
    pub fn set_default_port(&mut self, default_port: u16) {
        self.default_port = default_port;
    }

    /// Determines whether `user_info`, host and port are all unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_info.is_empty() && self.host.is_empty() && self.port == 0
    }

    /// Render the Authority, prefixed with `//`, according to `options`.
    ///
    /// Returns an empty string if nothing is left to render.  An empty
    /// `user_info` is never rendered, so a bare `@` can't appear.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniresid::{Authority, BuildOptions};
    ///
    /// # fn main() -> Result<(), uniresid::Error> {
    /// let authority = Authority::parse("joe@example.com")?;
    /// let options = BuildOptions {
    ///     user_info: false,
    ///     omit_default_port: false,
    ///     ..BuildOptions::default()
    /// };
    /// assert_eq!("//example.com:80", authority.build(options));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn build(&self, options: BuildOptions) -> String {
        let mut authority = String::new();
        if options.user_info && !self.user_info.is_empty() {
            authority.push_str(&self.user_info);
            authority.push('@');
        }
        authority.push_str(&self.host);
        if options.port {
            match self.port {
                0 if options.omit_default_port => (),
                0 => {
                    authority.push(':');
                    authority.push_str(&self.default_port.to_string());
                }
                port => {
                    authority.push(':');
                    authority.push_str(&port.to_string());
                }
            }
        }
        if authority.is_empty() {
            authority
        } else {
            format!("//{authority}")
        }
    }

    // ----------------------------------------------------------------------------------------------
    //                                         private methods
    // ----------------------------------------------------------------------------------------------
    fn parse_port(port_string: &str) -> Result<u16, Error> {
        port_string
            .parse::<u16>()
            .map_err(|_| Self::port_out_of_range(port_string))
    }

    fn port_out_of_range<T>(port: T) -> Error
    where
        T: Display,
    {
        Error::argument(Context::Port, format!("{port} is outside 0..=65535"))
    }
}

impl Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build(BuildOptions::default()))
    }
}

impl FromStr for Authority {
    type Err = Error;

    fn from_str(authority_string: &str) -> Result<Self, Self::Err> {
        Self::parse(authority_string)
    }
}

impl TryFrom<&'_ str> for Authority {
    type Error = Error;

    fn try_from(authority_string: &'_ str) -> Result<Self, Self::Error> {
        Self::parse(authority_string)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn forge_and_parse_agree() {
        let forged = Authority::forge("myhost", 80, "myusr:mypwd").unwrap();
        assert_eq!("//myusr:mypwd@myhost:80", forged.to_string());
        let parsed = Authority::parse("myusr:mypwd@myhost:80").unwrap();
        assert_eq!("//myusr:mypwd@myhost:80", parsed.to_string());
        assert_eq!(forged, parsed);
    }

    #[test]
    fn user_info() {
        struct Test {
            auth: &'static str,
            user_info: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                auth: "www.example.com",
                user_info: "",
            },
            Test {
                auth: "joe@www.example.com",
                user_info: "joe",
            },
            Test {
                auth: "pepe:feelsbadman@www.example.com",
                user_info: "pepe:feelsbadman",
            },
            Test {
                auth: "//%41@www.example.com",
                user_info: "%41",
            },
        ];
        for test_vector in test_vectors {
            let authority = Authority::parse(test_vector.auth);
            assert!(authority.is_ok());
            let authority = authority.unwrap();
            assert_eq!(test_vector.user_info, authority.user_info());
        }
    }

    #[test]
    fn host_and_port() {
        let test_vectors: &[(&str, &str, u16)] = &[
            ("", "", 0),
            ("example.com.", "example.com.", 0),
            ("1.2.3.4:8080", "1.2.3.4", 8080),
            ("[::1]:443", "[::1]", 443),
            ("[v7.aB]", "[v7.aB]", 0),
            ("wWw.exampLe.Com", "wWw.exampLe.Com", 0),
            (":65535", "", 65535),
            ("example.com/path?query", "example.com", 0),
        ];
        for (auth, host, port) in test_vectors {
            let authority = Authority::parse(auth).unwrap();
            assert_eq!(*host, authority.host(), "{}", auth);
            assert_eq!(*port, authority.port(), "{}", auth);
        }
    }

    #[test]
    fn illegal_authorities() {
        let test_vectors = [
            "exa mple.com",
            "a@b@example.com",
            "example.com:http",
            "[::1",
            "example.com:0",
            "example.com:080",
            "example.com:65536",
            "ex%zzample.com",
        ];
        for test_vector in &test_vectors {
            assert!(!Authority::validate(test_vector), "{}", test_vector);
            assert_eq!(
                Err(Error::Format(Context::Authority)),
                Authority::parse(test_vector)
            );
        }
    }

    #[test]
    fn port_range() {
        let mut authority = Authority::default();
        assert!(authority.set_port(0).is_ok());
        assert!(authority.set_port(65535).is_ok());
        assert_eq!(65535, authority.port());
        assert!(matches!(
            authority.set_port(-1),
            Err(Error::Argument {
                context: Context::Port,
                ..
            })
        ));
        assert!(matches!(
            authority.set_port(65536),
            Err(Error::Argument {
                context: Context::Port,
                ..
            })
        ));
        assert_eq!(65535, authority.port());
    }

    #[test]
    fn setters_reject_illegal_characters() {
        let mut authority = Authority::default();
        assert!(authority.set_host("bad host").is_err());
        assert!(authority.set_user_info("a@b").is_err());
        assert!(authority.set_user_info("a/b").is_err());
        assert!(Authority::forge("ok", 1, "no#pe").is_err());
        assert!(Authority::forge("ok", 70000, "").is_err());
    }

    #[test]
    fn default_port() {
        let mut authority = Authority::parse("example.com").unwrap();
        assert_eq!(0, authority.port());
        assert_eq!(DEFAULT_PORT, authority.port_or_default());
        authority.set_default_port(443);
        assert_eq!(443, authority.port_or_default());
        authority.set_port(8443).unwrap();
        assert_eq!(8443, authority.port_or_default());
    }

    #[test]
    fn build_options() {
        struct Test {
            options: BuildOptions,
            expected: &'static str,
        }
        let authority = Authority::parse("joe@example.com").unwrap();
        let test_vectors: &[Test] = &[
            Test {
                options: BuildOptions::default(),
                expected: "//joe@example.com",
            },
            Test {
                options: BuildOptions {
                    user_info: false,
                    ..BuildOptions::default()
                },
                expected: "//example.com",
            },
            Test {
                options: BuildOptions {
                    omit_default_port: false,
                    ..BuildOptions::default()
                },
                expected: "//joe@example.com:80",
            },
            Test {
                options: BuildOptions {
                    port: false,
                    omit_default_port: false,
                    ..BuildOptions::default()
                },
                expected: "//joe@example.com",
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(test_vector.expected, authority.build(test_vector.options));
        }
    }

    #[test]
    fn build_explicit_port_is_always_kept() {
        let authority = Authority::parse("example.com:80").unwrap();
        assert_eq!("//example.com:80", authority.build(BuildOptions::default()));
        let options = BuildOptions {
            port: false,
            ..BuildOptions::default()
        };
        assert_eq!("//example.com", authority.build(options));
    }

    #[test]
    fn empty_authority_builds_empty_string() {
        assert_eq!("", Authority::default().to_string());
        assert!(Authority::default().is_empty());
        let mut authority = Authority::default();
        authority.set_user_info("joe").unwrap();
        assert_eq!("//joe@", authority.to_string());
    }

    #[test]
    fn mutation_is_reflected_in_string() {
        let mut authority = Authority::parse("example.com:8080").unwrap();
        authority.set_host("example.org").unwrap();
        authority.set_port(0).unwrap();
        assert_eq!("//example.org", authority.to_string());
    }
}
