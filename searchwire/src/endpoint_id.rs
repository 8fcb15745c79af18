use std::fmt;

/// A validated endpoint identifier such as `ingest.get_pipeline`.
///
/// Rules:
/// 1. One or more segments separated by `.`.
/// 2. Each segment starts with an ASCII lowercase letter.
/// 3. Remaining characters are ASCII lowercase letters, digits or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(String);

#[derive(Debug, PartialEq, Eq)]
pub enum EndpointIdError {
    Empty,
    EmptySegment,
    InvalidStartCharacter(char),
    InvalidCharacter(char),
}

impl fmt::Display for EndpointIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "EndpointId cannot be empty"),
            Self::EmptySegment => write!(f, "EndpointId contains an empty segment"),
            Self::InvalidStartCharacter(c) => {
                write!(f, "EndpointId segment must start with a lowercase letter, found '{c}'")
            }
            Self::InvalidCharacter(c) => write!(f, "EndpointId contains invalid character: '{c}'"),
        }
    }
}

impl std::error::Error for EndpointIdError {}

impl EndpointId {
    pub fn new<S: Into<String>>(id: S) -> Result<Self, EndpointIdError> {
        let s = id.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Checks `s` against the identifier rules without allocating.
    pub fn validate(s: &str) -> Result<(), EndpointIdError> {
        if s.is_empty() {
            return Err(EndpointIdError::Empty);
        }

        for segment in s.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(EndpointIdError::EmptySegment),
                Some(c) if !c.is_ascii_lowercase() => {
                    return Err(EndpointIdError::InvalidStartCharacter(c))
                }
                _ => {}
            }

            if let Some(c) = chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')) {
                return Err(EndpointIdError::InvalidCharacter(c));
            }
        }

        Ok(())
    }

    /// The namespace part (`ingest` for `ingest.get_pipeline`), if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// The final segment (`get_pipeline` for `ingest.get_pipeline`).
    pub fn operation(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, op)| op)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EndpointId> for String {
    fn from(id: EndpointId) -> Self {
        id.0
    }
}

impl TryFrom<String> for EndpointId {
    type Error = EndpointIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EndpointId {
    type Error = EndpointIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
