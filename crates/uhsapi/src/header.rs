use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use bytes::Bytes;
use smallvec::SmallVec;
use unicase::Ascii;

use crate::ascii::{AsAsciiStr, AsciiString, InvalidAsciiError};

/// SPEC: RFC 9110 - 5.6.2. Tokens
/// ABNF: tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHeaderName;

impl fmt::Display for InvalidHeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid header name")
    }
}

impl std::error::Error for InvalidHeaderName {}

impl From<InvalidAsciiError> for InvalidHeaderName {
    fn from(_: InvalidAsciiError) -> Self {
        Self
    }
}

/// A field name
/// SPEC: RFC 9110 - 5.1. Field Names
/// ABNF: field-name = token
///
/// Names compare case-insensitively but keep the casing they were created with.
#[derive(Clone)]
pub struct HeaderName(Repr);

#[derive(Clone)]
enum Repr {
    Builtin(&'static str),
    Custom(AsciiString),
}

impl HeaderName {
    pub const ACCEPT: Self = Self(Repr::Builtin("Accept"));
    pub const CONTENT_TYPE: Self = Self(Repr::Builtin("Content-Type"));
    pub const CONTENT_LENGTH: Self = Self(Repr::Builtin("Content-Length"));
    pub const TRANSFER_ENCODING: Self = Self(Repr::Builtin("Transfer-Encoding"));

    /// Creates a header name from a string literal.
    ///
    /// # Panics
    /// If `name` is not a valid token.
    pub fn from_static(name: &'static str) -> Self {
        if name.is_empty() || !name.bytes().all(is_tchar) {
            panic!("invalid header name {name:?}");
        }
        Self(Repr::Builtin(name))
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Builtin(name) => name,
            Repr::Custom(name) => name.as_str(),
        }
    }
}

impl TryFrom<&[u8]> for HeaderName {
    type Error = InvalidHeaderName;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() || !value.iter().copied().all(is_tchar) {
            return Err(InvalidHeaderName);
        }
        Ok(Self(Repr::Custom(value.as_ascii_str()?.to_ascii_string())))
    }
}

impl TryFrom<&str> for HeaderName {
    type Error = InvalidHeaderName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<String> for HeaderName {
    type Error = InvalidHeaderName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || !value.bytes().all(is_tchar) {
            return Err(InvalidHeaderName);
        }
        Ok(Self(Repr::Custom(AsciiString::from_bytes(value.into_bytes())?)))
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        Ascii::new(self.as_str()) == Ascii::new(other.as_str())
    }
}

impl Eq for HeaderName {}

impl Hash for HeaderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Ascii::new(self.as_str()).hash(state)
    }
}

impl fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All values of a single field, in the order they were added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValue {
    values: SmallVec<[Bytes; 1]>,
}

impl Default for HeaderValue {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderValue {
    pub fn new() -> Self {
        Self {
            values: SmallVec::new(),
        }
    }

    pub fn push(&mut self, bytes: Bytes) {
        self.values.push(bytes);
    }
}

impl Deref for HeaderValue {
    type Target = [Bytes];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

/// An ordered multimap of header fields.
///
/// Names keep the position of their first insertion, and values keep the order
/// they were appended in. Lookups are linear, which is cheaper than hashing for
/// the handful of fields a response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, name: &HeaderName) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn entry(&mut self, name: HeaderName) -> &mut HeaderValue {
        let idx = match self.position(&name) {
            Some(idx) => idx,
            None => {
                self.entries.push((name, HeaderValue::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub fn append(&mut self, name: HeaderName, value: impl Into<Bytes>) {
        self.entry(name).push(value.into());
    }

    /// Replaces every value of `name` with `value`
    pub fn insert(&mut self, name: HeaderName, value: impl Into<Bytes>) {
        let entry = self.entry(name);
        entry.values.clear();
        entry.push(value.into());
    }

    pub fn remove(&mut self, name: &HeaderName) -> Option<HeaderValue> {
        let idx = self.position(name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, name: &HeaderName) -> Option<&Bytes> {
        self.get_all(name).first()
    }

    pub fn get_all(&self, name: &HeaderName) -> &[Bytes] {
        match self.position(name) {
            Some(idx) => self.entries[idx].1.values.as_slice(),
            None => &[],
        }
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.position(name).is_some()
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

impl<V: Into<Bytes>> FromIterator<(HeaderName, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (HeaderName, V)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        map.extend(iter);
        map
    }
}

impl<V: Into<Bytes>> Extend<(HeaderName, V)> for HeaderMap {
    fn extend<T: IntoIterator<Item = (HeaderName, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(HeaderName::try_from("X-RateLimit-Remaining").is_ok());
        assert_eq!(HeaderName::try_from(""), Err(InvalidHeaderName));
        assert_eq!(HeaderName::try_from("Bad Name"), Err(InvalidHeaderName));
        assert_eq!(HeaderName::try_from("Bad:Name"), Err(InvalidHeaderName));
        assert_eq!(HeaderName::try_from("naïve"), Err(InvalidHeaderName));
    }

    #[test]
    #[should_panic]
    fn from_static_rejects_invalid() {
        HeaderName::from_static("not valid");
    }

    #[test]
    fn name_case_insensitive() {
        let custom = HeaderName::try_from("content-type").unwrap();
        assert_eq!(custom, HeaderName::CONTENT_TYPE);
        assert_eq!(custom.as_str(), "content-type");

        let mut map = HeaderMap::new();
        map.append(HeaderName::CONTENT_TYPE, "application/json");
        assert_eq!(
            map.get(&custom),
            Some(&Bytes::from_static(b"application/json"))
        );
    }

    #[test]
    fn map_preserves_order() {
        let a = HeaderName::from_static("a");
        let b = HeaderName::from_static("b");
        let mut map = HeaderMap::new();
        map.append(b.clone(), "1");
        map.append(a.clone(), "2");
        map.append(b.clone(), "3");

        let names: Vec<_> = map.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(map.get_all(&b), [Bytes::from("1"), Bytes::from("3")]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn map_remove_and_insert() {
        let x = HeaderName::from_static("X-Test");
        let mut map: HeaderMap = [(x.clone(), "one"), (x.clone(), "two")].into_iter().collect();

        map.insert(x.clone(), "three");
        assert_eq!(map.get_all(&x), [Bytes::from("three")]);

        let removed = map.remove(&x).unwrap();
        assert_eq!(&removed[..], [Bytes::from("three")]);
        assert!(map.get_all(&x).is_empty());
        assert!(map.remove(&x).is_none());
        assert!(map.is_empty());
    }
}
