#![doc = include_str!("../README.md")]

#[cfg(feature = "http")]
pub mod http_utils;
pub mod query;
pub mod url_decoding;

#[cfg(feature = "http")]
pub use http_utils::{FormExt, ParseError, QueryExt};
pub use query::{pairs, parse_multi, parse_single, split_once, MultiQueryMap, QueryMap};
pub use url_decoding::decode;

#[cfg(feature = "http")]
pub use http;
