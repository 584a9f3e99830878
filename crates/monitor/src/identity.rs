//! Method identity and HTTP endpoint resolution.
//!
//! The interception layer describes each monitored method with a
//! [`MethodIdentity`]; web-framework routing metadata is abstracted behind
//! the [`EndpointResolver`] trait so the engine only ever consumes the
//! resolved method/path pair, never framework types.

use serde::{Deserialize, Serialize};

/// A resolved HTTP route for a monitored method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpEndpoint {
    /// HTTP verb, e.g. `GET`
    pub method: String,
    /// Route path, e.g. `/documents/{id}`
    pub path: String,
}

impl HttpEndpoint {
    /// Create an endpoint descriptor.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    /// Render the display prefix, e.g. `"[GET] /documents/{id}"`.
    pub fn prefix(&self) -> String {
        format!("[{}] {}", self.method.to_uppercase(), self.path)
    }
}

/// Identity of a monitored method as reported by the interception layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodIdentity {
    /// Bare method name
    pub method_name: String,
    /// Enclosing type name, when known
    pub class_name: Option<String>,
    /// Route already resolved by the interception layer, when known
    pub route: Option<HttpEndpoint>,
}

impl MethodIdentity {
    /// Identity from a bare method name.
    pub fn new(method_name: &str) -> Self {
        Self {
            method_name: method_name.to_string(),
            ..Default::default()
        }
    }

    /// Attach the enclosing type name.
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Attach a pre-resolved route.
    pub fn with_route(mut self, route: HttpEndpoint) -> Self {
        self.route = Some(route);
        self
    }

    /// The display name, class-qualified on request.
    pub fn display_name(&self, qualified: bool) -> String {
        match (&self.class_name, qualified) {
            (Some(class), true) => format!("{class}.{}", self.method_name),
            _ => self.method_name.clone(),
        }
    }
}

impl From<&str> for MethodIdentity {
    fn from(name: &str) -> Self {
        MethodIdentity::new(name)
    }
}

/// Pluggable endpoint descriptor resolver.
///
/// Implemented by the interception layer per web framework; returns the
/// HTTP method and path for an identity when the framework's routing
/// metadata recognizes it.
pub trait EndpointResolver {
    fn resolve(&self, identity: &MethodIdentity) -> Option<HttpEndpoint>;
}
