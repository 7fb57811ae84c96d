//! Call context handed to rule evaluation.

use serde::Deserialize;

use super::vocab::ComponentType;

/// Request attributes consulted by contextual rule predicates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestContext {
    /// GPP section ids applicable to the request.
    #[serde(default)]
    pub gpp_sids: Vec<u16>,
    /// Device country (ISO-3166 alpha-3, e.g. `USA`).
    #[serde(default)]
    pub country: Option<String>,
    /// Device region within `country` (e.g. `CA`).
    #[serde(default)]
    pub region: Option<String>,
    /// Global Privacy Control signal as sent by the client.
    #[serde(default)]
    pub gpc: Option<String>,
}

/// Who is asking, plus the optional request they are asking for.
#[derive(Debug, Clone, Copy)]
pub struct ActivityInvocationPayload<'a> {
    pub component_type: ComponentType,
    pub component_name: &'a str,
    pub request: Option<&'a RequestContext>,
}

impl<'a> ActivityInvocationPayload<'a> {
    pub fn new(component_type: ComponentType, component_name: &'a str) -> Self {
        Self {
            component_type,
            component_name,
            request: None,
        }
    }

    pub fn with_request(mut self, request: &'a RequestContext) -> Self {
        self.request = Some(request);
        self
    }
}
