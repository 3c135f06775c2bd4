//! This crate implements the grammar of [IETF RFC
//! 3986](https://tools.ietf.org/html/rfc3986), "Uniform Resource Identifier
//! (URI): Generic Syntax".  The [`Uri`] type can be used to parse, validate
//! and generate URI strings to and from their various components, each of
//! which has a type of its own: [`Authority`], [`Path`] and [`Query`].
//!
//! A Uniform Resource Identifier (URI) is a compact sequence of characters
//! that identifies an abstract or physical resource.  One common form of URI
//! is the Uniform Resource Locator (URL), used to reference web resources:
//!
//! ```text
//! http://www.example.com/foo?bar=baz#qux
//! ```
//!
//! Another kind of URI is the path reference:
//!
//! ```text
//! /usr/bin/zip
//! ```
//!
//! # Examples
//!
//! ## Parsing a URI into its components
//!
//! ```rust
//! use uniresid::Uri;
//!
//! let uri = Uri::parse("http://www.example.com/foo?bar=baz#qux").unwrap();
//! assert_eq!("www.example.com", uri.authority().host());
//! assert_eq!("/foo", uri.path_to_string());
//! assert_eq!("?bar=baz", uri.query_to_string());
//! assert_eq!("qux", uri.fragment());
//! ```
//!
//! ## Generating a URI from its components
//!
//! ```rust
//! use uniresid::{Authority, Path, Query, Uri};
//!
//! let mut uri = Uri::default();
//! assert!(uri.set_scheme("http").is_ok());
//! uri.set_authority(Authority::forge("www.example.com", 0, "").unwrap());
//! uri.set_path(Path::parse("/foo").unwrap());
//! uri.set_query(Query::parse("bar=baz", true).unwrap());
//! assert!(uri.set_fragment("qux").is_ok());
//! assert_eq!("http://www.example.com/foo?bar=baz#qux", uri.to_string());
//! ```
//!
//! ## Validating without constructing
//!
//! ```rust
//! use uniresid::Uri;
//!
//! assert!(Uri::validate("urn:issn:1535-3613"));
//! assert!(!Uri::validate("http://exa mple.com/"));
//! ```
//!
//! [`Uri`]: struct.Uri.html
//! [`Authority`]: struct.Authority.html
//! [`Path`]: struct.Path.html
//! [`Query`]: struct.Query.html

// #![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]
#![warn(missing_docs)]

mod authority;
pub use authority::{Authority, BuildOptions, DEFAULT_PORT};

mod codec;

mod components;
pub use components::{Components, Part};

mod context;
pub use context::Context;

mod error;
pub use error::{Error, ErrorKind};

mod grammar;

mod path;
pub use path::Path;

mod query;
pub use query::Query;

mod uri;
pub use uri::Uri;
