//! Splitting of `&` separated query strings and form bodies into decoded key value maps.

use std::{collections::HashMap, str::Split};

use crate::url_decoding::decode;

/// Query parameters with repeated keys joined by a comma. Ex: "a=1&a=2" -> {"a": "1,2"}
pub type QueryMap = HashMap<String, String>;

/// Query parameters with every value of a repeated key kept in order. Ex: "a=1&a=2" -> {"a":
/// ["1", "2"]}
pub type MultiQueryMap = HashMap<String, Vec<String>>;

/// Splits a single fragment on its first `=`.
///
/// The key is returned as is, only the value is decoded. A fragment without any `=` has no value
/// at all, while `key=` has an empty one.
pub fn split_once(fragment: &str) -> (&str, Option<String>) {
    match fragment.split_once('=') {
        Some((key, value)) => (key, Some(decode(value))),
        None => (fragment, None),
    }
}

/// Iterator over the fragments of a query string, yielding each key and its decoded value.
///
/// Created with [`pairs`].
pub struct Pairs<'a> {
    fragments: Split<'a, char>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, Option<String>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let fragment = self.fragments.next()?;

            if fragment.is_empty() {
                continue;
            }

            return Some(split_once(fragment));
        }
    }
}

/// Lazily splits `query` on `&`. Empty fragments are skipped.
pub fn pairs(query: &str) -> Pairs<'_> {
    Pairs {
        fragments: query.split('&'),
    }
}

/// Parses a query string, joining the values of repeated keys with a comma. Keys without a value
/// are left out.
pub fn parse_single(query: &str) -> QueryMap {
    let mut map = QueryMap::new();

    for (key, value) in pairs(query) {
        let Some(value) = value else {
            log::trace!("skipping query key {key:?} without a value");
            continue;
        };

        match map.get_mut(key) {
            Some(existing) => {
                existing.push(',');
                existing.push_str(&value);
            }

            None => {
                map.insert(key.to_string(), value);
            }
        }
    }

    map
}

/// Parses a query string, collecting every value of a key in the order they appear. Keys without
/// a value are left out.
pub fn parse_multi(query: &str) -> MultiQueryMap {
    let mut map = MultiQueryMap::new();

    for (key, value) in pairs(query) {
        let Some(value) = value else {
            log::trace!("skipping query key {key:?} without a value");
            continue;
        };

        map.entry(key.to_string()).or_default().push(value);
    }

    map
}
