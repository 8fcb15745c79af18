//! Endpoint descriptors and path-variant resolution.
//!
//! An [`EndpointDescriptor`] is static data: a closed table of
//! [`PathVariant`]s, each pairing a URL template with an HTTP method. The set
//! of parameters a template mentions is the combination that selects it. At
//! build time the supplied [`ParamSet`] is compared against every variant and
//! the one whose parameter set matches *exactly* is rendered.
//!
//! ## Examples
//!
//! ```rust
//! use searchwire::endpoint::{BodyKind, EndpointDescriptor, PathVariant, Segment::*};
//! use searchwire::{ParamSet, RestMethod};
//!
//! static GET_WIDGET: EndpointDescriptor = EndpointDescriptor {
//!     name: "widgets.get",
//!     description: "Returns widgets",
//!     docs_url: None,
//!     variants: &[
//!         PathVariant::new(RestMethod::Get, &[Literal("widgets")]),
//!         PathVariant::new(RestMethod::Get, &[Literal("widgets"), Param("id")]),
//!     ],
//!     query: &[],
//!     body: BodyKind::None,
//! };
//!
//! let mut params = ParamSet::new();
//! assert_eq!(GET_WIDGET.resolve(&params).unwrap().path, "/widgets");
//!
//! params.set("id", "42");
//! let resolved = GET_WIDGET.resolve(&params).unwrap();
//! assert_eq!(resolved.method, RestMethod::Get);
//! assert_eq!(resolved.path, "/widgets/42");
//! ```

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::endpoint_id::EndpointId;
use crate::error::{BuildError, ConfigError};
use crate::method::RestMethod;
use crate::params::{escape_segment, is_dot_segment, ParamSet};

/// One path segment of a URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Emitted verbatim.
    Literal(&'static str),
    /// Replaced by the percent-escaped value of the named path parameter.
    Param(&'static str),
}

/// One (parameter combination, URL template, method) row of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathVariant {
    pub method: RestMethod,
    pub segments: &'static [Segment],
}

impl PathVariant {
    pub const fn new(method: RestMethod, segments: &'static [Segment]) -> Self {
        Self { method, segments }
    }

    /// Names of the path parameters this template requires, in template order.
    pub fn params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if `supplied` names exactly this variant's parameters.
    pub fn matches(&self, supplied: &ParamSet) -> bool {
        supplied.matches_exactly(self.params())
    }

    /// Renders the path, escaping each parameter value.
    ///
    /// Returns `None` if a required parameter is missing from `supplied`.
    pub fn render(&self, supplied: &ParamSet) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }

        let mut path = String::new();
        for segment in self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => path.push_str(&escape_segment(supplied.get(name)?)),
            }
        }
        Some(path)
    }

    /// The template in `{param}` notation, e.g. `/_ingest/pipeline/{id}`.
    pub fn template(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_char('/');
        }
        for segment in self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{literal}")?,
                Segment::Param(name) => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}

/// Whether an endpoint accepts a request body.
///
/// Informational: the engine does not reject a request whose body presence
/// disagrees with the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    #[default]
    None,
    Optional,
    Required,
}

/// Static description of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Dotted identifier, e.g. `ingest.get_pipeline`. Attached to every error.
    pub name: &'static str,
    pub description: &'static str,
    pub docs_url: Option<&'static str>,
    /// Closed table of path variants. Parameter sets must be pairwise distinct.
    pub variants: &'static [PathVariant],
    /// Declared query parameter names.
    pub query: &'static [&'static str],
    pub body: BodyKind,
}

/// The method and escaped path selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub method: RestMethod,
    pub path: String,
}

impl EndpointDescriptor {
    /// Every path parameter mentioned by any variant, sorted.
    pub fn path_params(&self) -> BTreeSet<&'static str> {
        self.variants.iter().flat_map(PathVariant::params).collect()
    }

    /// Returns `true` if `name` is a declared query parameter.
    pub fn accepts_query(&self, name: &str) -> bool {
        self.query.contains(&name)
    }

    /// Finds the variant whose parameter set equals the supplied one.
    pub fn variant_for(&self, supplied: &ParamSet) -> Option<&'static PathVariant> {
        self.variants.iter().find(|variant| variant.matches(supplied))
    }

    /// Selects the matching variant and renders its path.
    ///
    /// ## Errors
    ///
    /// - [`BuildError::PathResolution`] if no variant matches
    /// - [`BuildError::DotSegment`] if a value would render as `.` or `..`
    pub fn resolve(&self, supplied: &ParamSet) -> Result<ResolvedPath, BuildError> {
        let unresolved = || BuildError::PathResolution {
            endpoint: self.name,
            supplied: supplied.names().map(str::to_string).collect(),
        };
        let variant = self.variant_for(supplied).ok_or_else(unresolved)?;

        for param in variant.params() {
            let value = supplied.get(param).ok_or_else(unresolved)?;
            if is_dot_segment(&escape_segment(value)) {
                return Err(BuildError::DotSegment {
                    endpoint: self.name,
                    param,
                    value: value.to_string(),
                });
            }
        }

        let path = variant.render(supplied).ok_or_else(unresolved)?;
        Ok(ResolvedPath {
            method: variant.method,
            path,
        })
    }

    /// Checks the descriptor for structural mistakes.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidEndpointId`] for a malformed name
    /// - [`ConfigError::InvalidPathTemplate`] for empty tables, empty or
    ///   slash-bearing literals, empty parameter names, or a parameter used twice
    /// - [`ConfigError::AmbiguousVariants`] when two variants share a parameter set
    pub fn validate(&self) -> Result<(), ConfigError> {
        EndpointId::validate(self.name)?;

        if self.variants.is_empty() {
            return Err(ConfigError::invalid_path(self.name, "no path variants"));
        }

        let mut seen: Vec<BTreeSet<&str>> = Vec::with_capacity(self.variants.len());
        for variant in self.variants {
            let mut params = BTreeSet::new();
            for segment in variant.segments {
                match segment {
                    Segment::Literal(literal) if literal.is_empty() || literal.contains('/') => {
                        return Err(ConfigError::invalid_path(
                            self.name,
                            format!("literal segment {literal:?} in {variant} must be non-empty and slash-free"),
                        ));
                    }
                    Segment::Param("") => {
                        return Err(ConfigError::invalid_path(
                            self.name,
                            format!("unnamed parameter in {variant}"),
                        ));
                    }
                    Segment::Param(name) if !params.insert(*name) => {
                        return Err(ConfigError::invalid_path(
                            self.name,
                            format!("parameter {name} appears twice in {variant}"),
                        ));
                    }
                    _ => {}
                }
            }

            if seen.contains(&params) {
                return Err(ConfigError::AmbiguousVariants {
                    endpoint: self.name.to_string(),
                    params: params.iter().map(|p| p.to_string()).collect(),
                });
            }
            seen.push(params);
        }

        Ok(())
    }
}
