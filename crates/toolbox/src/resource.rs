//! Resource registry
//!
//! Resources are read by URI instead of invoked by name. A resource is
//! either a fixed URI (`system://info`) or a template with `{name}`
//! placeholders (`user://{username}/info`). Handlers build their payload
//! from process-local information on every read and cannot fail.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::RegistryError;

/// Variables extracted from a templated URI
pub type UriParams = BTreeMap<String, String>;

type ResourceHandler = dyn Fn(&UriParams) -> String + Send + Sync;

/// Payload returned by `resources/read`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    pub text: String,
}

/// One registered resource
pub struct ResourceSpec {
    pub name: &'static str,
    pub uri_template: &'static str,
    pub mime_type: &'static str,
    handler: Box<ResourceHandler>,
}

impl ResourceSpec {
    pub fn new<F>(name: &'static str, uri_template: &'static str, handler: F) -> Self
    where
        F: Fn(&UriParams) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            uri_template,
            mime_type: "application/json",
            handler: Box::new(handler),
        }
    }

    /// Whether the URI contains `{placeholders}`
    pub fn is_template(&self) -> bool {
        self.uri_template.contains('{')
    }

    fn read(&self, uri: &str, params: &UriParams) -> ResourceContents {
        ResourceContents {
            uri: uri.to_string(),
            mime_type: self.mime_type,
            text: (self.handler)(params),
        }
    }
}

impl fmt::Debug for ResourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSpec")
            .field("name", &self.name)
            .field("uri_template", &self.uri_template)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// Registry of resources one service instance exposes
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceSpec>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource.
    ///
    /// # Panics
    ///
    /// If the name or URI template is already taken.
    pub fn register(&mut self, spec: ResourceSpec) {
        if let Err(e) = self.try_register(spec) {
            panic!("{e}");
        }
    }

    pub fn try_register(&mut self, spec: ResourceSpec) -> Result<(), RegistryError> {
        let clash = self
            .resources
            .iter()
            .any(|r| r.name == spec.name || r.uri_template == spec.uri_template);
        if clash {
            return Err(RegistryError::DuplicateResource(spec.name.to_string()));
        }
        self.resources.push(spec);
        Ok(())
    }

    /// Fixed-URI resources, for `resources/list`
    pub fn statics(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter().filter(|r| !r.is_template())
    }

    /// Templated resources, for `resources/templates/list`
    pub fn templates(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter().filter(|r| r.is_template())
    }

    /// Read a resource by URI. Fixed URIs win over templates.
    pub fn read(&self, uri: &str) -> Option<ResourceContents> {
        if let Some(spec) = self.statics().find(|r| r.uri_template == uri) {
            return Some(spec.read(uri, &UriParams::new()));
        }
        self.templates().find_map(|spec| {
            match_template(spec.uri_template, uri).map(|params| spec.read(uri, &params))
        })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Match `uri` against a `{var}` template.
///
/// A variable matches one non-empty path segment (no `/`).
fn match_template(template: &str, uri: &str) -> Option<UriParams> {
    let mut params = UriParams::new();
    let mut tpl = template;
    let mut rest = uri;

    while !tpl.is_empty() {
        if let Some(after_brace) = tpl.strip_prefix('{') {
            let end = after_brace.find('}')?;
            let var = &after_brace[..end];
            tpl = &after_brace[end + 1..];

            let literal = &tpl[..tpl.find('{').unwrap_or(tpl.len())];
            let value_end = if literal.is_empty() {
                rest.len()
            } else {
                rest.find(literal)?
            };
            let value = &rest[..value_end];
            if value.is_empty() || value.contains('/') {
                return None;
            }
            params.insert(var.to_string(), value.to_string());
            rest = &rest[value_end..];
        } else {
            let literal_end = tpl.find('{').unwrap_or(tpl.len());
            rest = rest.strip_prefix(&tpl[..literal_end])?;
            tpl = &tpl[literal_end..];
        }
    }

    rest.is_empty().then_some(params)
}
