//! Per-request parameter accumulation.
//!
//! [`ParamSet`] records which path parameters were supplied (the presence set
//! matched against an endpoint's path variants), [`QueryParams`] collects query
//! string values and [`Headers`] collects caller headers. All three are plain
//! accumulators: they never validate values, and the last write for a key wins.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped when a parameter value is interpolated into a path segment.
///
/// Everything outside the unreserved set is escaped except the sub-delimiters
/// that are legal inside a segment (`$&+:=@`). In particular `/`, `?`, `#`,
/// `;` and `,` are escaped so a value can never change the path structure.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Percent-escapes a value for insertion as a single path segment.
pub fn escape_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Returns `true` if an escaped segment is one that URL parsing treats as
/// `.` or `..`, including the `%2e` spellings in either case.
pub fn is_dot_segment(escaped: &str) -> bool {
    let unescaped = escaped.to_ascii_lowercase().replace("%2e", ".");
    unescaped == "." || unescaped == ".."
}

/// The set of path parameters supplied for one endpoint invocation.
///
/// Setting a parameter twice overwrites its value; presence is tracked once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    values: BTreeMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for the path parameter `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the raw (unescaped) value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Supplied parameter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if the supplied names are exactly `required`.
    ///
    /// `required` must not contain duplicates; descriptor validation
    /// guarantees this for path variants.
    pub fn matches_exactly<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        let mut count = 0;
        for name in required {
            if !self.values.contains_key(name) {
                return false;
            }
            count += 1;
        }
        count == self.values.len()
    }
}

/// Query string parameters. Keys are unique and encoded in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl QueryValue) {
        self.values.insert(name.into(), value.into_query_value());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Removes a parameter, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the parameters as `application/x-www-form-urlencoded`, sorted by key.
    ///
    /// Returns an empty string when no parameters are set.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter())
            .finish()
    }
}

/// Caller-supplied request headers.
///
/// Names compare case-insensitively; setting an existing name replaces both
/// the value and the stored spelling of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Sets the header only if no header with this name exists.
    ///
    /// Returns `true` if the header was inserted.
    pub fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push((name.to_string(), value.to_string()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k, v);
        }
        headers
    }
}

/// Conversion of a typed value into its query-string form.
///
/// Lists are comma-joined, booleans render as `true`/`false`.
pub trait QueryValue {
    fn into_query_value(self) -> String;
}

impl QueryValue for &str {
    fn into_query_value(self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn into_query_value(self) -> String {
        self
    }
}

impl QueryValue for &String {
    fn into_query_value(self) -> String {
        self.clone()
    }
}

impl QueryValue for bool {
    fn into_query_value(self) -> String {
        let value = if self { "true" } else { "false" };
        value.to_string()
    }
}

macro_rules! display_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn into_query_value(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_query_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<S: AsRef<str>> QueryValue for &[S] {
    fn into_query_value(self) -> String {
        self.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
    }
}

impl<S: AsRef<str>> QueryValue for Vec<S> {
    fn into_query_value(self) -> String {
        self.as_slice().into_query_value()
    }
}

impl<S: AsRef<str>, const N: usize> QueryValue for [S; N] {
    fn into_query_value(self) -> String {
        self.as_slice().into_query_value()
    }
}
