//! Credentials applied by the reqwest transport.

use std::fmt;

use reqwest::header::AUTHORIZATION;

/// How the transport authenticates against the cluster.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    None,
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// Sent as `Authorization: ApiKey {key}` (the base64 encoded `id:api_key`).
    ApiKey(String),
    /// Sent as `Authorization: Bearer {token}`.
    Bearer(String),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Adds the `Authorization` header to `request`.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::None => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::ApiKey(key) => request.header(AUTHORIZATION, format!("ApiKey {key}")),
            Self::Bearer(token) => request.bearer_auth(token),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorization(credentials: &Credentials) -> Option<String> {
        let request = credentials
            .apply(reqwest::Client::new().get("http://localhost:9200/"))
            .build()
            .unwrap();
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn api_key_scheme() {
        assert_eq!(
            authorization(&Credentials::ApiKey("a2V5".into())).as_deref(),
            Some("ApiKey a2V5")
        );
    }

    #[test]
    fn bearer_scheme() {
        assert_eq!(
            authorization(&Credentials::Bearer("tok".into())).as_deref(),
            Some("Bearer tok")
        );
    }

    #[test]
    fn basic_scheme() {
        // "elastic:changeme"
        assert_eq!(
            authorization(&Credentials::basic("elastic", "changeme")).as_deref(),
            Some("Basic ZWxhc3RpYzpjaGFuZ2VtZQ==")
        );
    }

    #[test]
    fn none_adds_nothing() {
        assert!(Credentials::default().is_none());
        assert_eq!(authorization(&Credentials::None), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug = format!("{:?}", Credentials::basic("elastic", "changeme"));
        assert!(debug.contains("elastic"));
        assert!(!debug.contains("changeme"));
        assert!(!format!("{:?}", Credentials::ApiKey("secret".into())).contains("secret"));
    }
}
