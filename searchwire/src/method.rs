//! HTTP methods used by endpoint path variants.

use strum::{Display, EnumIter, EnumString};

/// HTTP method attached to a [`PathVariant`](crate::endpoint::PathVariant).
///
/// Every path variant of an endpoint carries exactly one method; two variants
/// of the same endpoint may use different methods (indexing a document with an
/// explicit id is a `PUT`, without one it is a `POST`).
///
/// ## Examples
///
/// ```rust
/// use searchwire::RestMethod;
///
/// let method: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(method, RestMethod::Delete);
/// assert!(method.is_idempotent());
/// assert_eq!(method.to_string(), "DELETE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Read a resource.
    Get,
    /// Create a resource or run an action (search, revert, unfollow).
    Post,
    /// Create or replace a resource at a known path.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
    /// Existence check, headers only.
    Head,
    /// Query supported methods.
    Options,
}

impl RestMethod {
    /// Returns the method token as it appears on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns `true` if requests with this method conventionally carry a body.
    ///
    /// This is advisory only. The search API accepts bodies on `GET` and
    /// `DELETE` (closing a point in time sends its id in a `DELETE` body), so
    /// the engine never strips a body based on the method.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if repeating the request has the same effect as sending it once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Returns `true` if the method is read-only.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn display_matches_wire_token() {
        for method in RestMethod::iter() {
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("HEAD".parse::<RestMethod>().unwrap(), RestMethod::Head);
        assert_eq!("PUT".parse::<RestMethod>().unwrap(), RestMethod::Put);
        assert!("put".parse::<RestMethod>().is_err());
        assert!("TRACE".parse::<RestMethod>().is_err());
    }

    #[test]
    fn body_convention() {
        assert!(RestMethod::Post.has_body());
        assert!(RestMethod::Put.has_body());
        assert!(!RestMethod::Delete.has_body());
        assert!(!RestMethod::Head.has_body());
    }

    #[test]
    fn idempotency_and_safety() {
        assert!(RestMethod::Put.is_idempotent());
        assert!(RestMethod::Delete.is_idempotent());
        assert!(!RestMethod::Post.is_idempotent());
        assert!(RestMethod::Head.is_safe());
        assert!(!RestMethod::Delete.is_safe());
    }

    #[test]
    fn all_variants_convert_to_reqwest() {
        assert_eq!(RestMethod::iter().count(), 7);
        for method in RestMethod::iter() {
            assert_eq!(method.to_reqwest().as_str(), method.as_str());
        }
    }
}
