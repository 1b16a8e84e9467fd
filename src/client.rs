//! UserService Client
//!
//! The public entry point: holds the settings store and a transport, builds the
//! parameter mapping for each operation, delegates the round trip to the
//! transport, and classifies the reply.
//!
//! Each call performs exactly one outbound request and blocks (awaits) until
//! the transport yields a body or fails. The client adds no concurrency of its
//! own; the settings store is unsynchronized, so mutating settings while calls
//! are in flight is undefined unless the embedding application serializes
//! access itself.

use tracing::debug;

use crate::errors::Error;
use crate::params::{ Operation, RequestParameters };
use crate::response::{ classify, Outcome };
use crate::settings::ClientSettings;
use crate::transport::http::HttpTransport;
use crate::transport::stream::StreamTransport;
use crate::transport::BoxedTransport;

/// Optional account fields for add/update operations
///
/// Absent fields are simply not sent; fields that fail validation (empty
/// strings, malformed emails, empty group lists) are omitted the same way.
#[derive(Debug, Clone, Default)]
pub struct UserAttributes {
    /// Display name
    pub name: Option<String>,
    /// Email address; dropped from the request unless syntactically valid
    pub email: Option<String>,
    /// Group names, sent comma-joined
    pub groups: Option<Vec<String>>,
    /// New password; only meaningful for update
    pub password: Option<String>,
}

impl UserAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Optional roster-entry fields
#[derive(Debug, Clone, Default)]
pub struct RosterAttributes {
    /// Contact display name
    pub name: Option<String>,
    /// Subscription code; dropped unless in the allowed set
    pub subscription: Option<i32>,
}

impl RosterAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_subscription(mut self, code: i32) -> Self {
        self.subscription = Some(code);
        self
    }
}

/// Builder for creating UserServiceClient instances with custom configuration
pub struct UserServiceClientBuilder {
    settings: ClientSettings,
    transport: Option<BoxedTransport>,
}

impl Default for UserServiceClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UserServiceClientBuilder {
    pub fn new() -> Self {
        Self {
            settings: ClientSettings::new(),
            transport: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.settings.set("host", host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.settings.set("port", port);
        self
    }

    pub fn with_plugin_path(mut self, path: impl Into<String>) -> Self {
        self.settings.set("plugin", path.into());
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.settings.set("secret", secret.into());
        self
    }

    pub fn with_ssl(mut self, enabled: bool) -> Self {
        self.settings.set("use_ssl", enabled);
        self
    }

    /// Prefer the stream fallback over the full HTTP client
    pub fn with_stream_transport(mut self) -> Self {
        self.settings.set("use_curl", false);
        self
    }

    /// Supply a custom transport, overriding the settings-driven choice
    pub fn with_transport(mut self, transport: BoxedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client. Without an explicit transport, the `use_curl` setting
    /// picks between the HTTP client and the stream fallback.
    pub fn build(self) -> Result<UserServiceClient, Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None if self.settings.prefers_http_client() => Box::new(HttpTransport::new()?),
            None => Box::new(StreamTransport::new()),
        };
        Ok(UserServiceClient {
            settings: self.settings,
            transport,
        })
    }
}

/// Client for the OpenFire UserService plugin
pub struct UserServiceClient {
    settings: ClientSettings,
    transport: BoxedTransport,
}

impl UserServiceClient {
    /// Client with default settings and the HTTP transport
    pub fn new() -> Result<Self, Error> {
        UserServiceClientBuilder::new().build()
    }

    pub fn builder() -> UserServiceClientBuilder {
        UserServiceClientBuilder::new()
    }

    /// Read access to the settings store
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Mutable access to the settings store
    pub fn settings_mut(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    async fn do_request(&self, params: RequestParameters) -> Result<Outcome, Error> {
        let endpoint = self.settings.endpoint_url()?;
        debug!("sending {} request to {}", params.get("type").unwrap_or("?"), endpoint);
        let body = self.transport.send(&endpoint, &params).await?;
        Ok(classify(&body))
    }

    /// Create a user account
    pub async fn add_user(
        &self,
        username: &str,
        password: &str,
        attributes: &UserAttributes
    ) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::Add, self.settings.secret());
        params.push_required("username", username);
        params.push_required("password", password);
        params.push_string("name", attributes.name.as_deref());
        params.push_email("email", attributes.email.as_deref());
        params.push_groups("groups", attributes.groups.as_deref());
        self.do_request(params).await
    }

    /// Delete a user account
    pub async fn delete_user(&self, username: &str) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::Delete, self.settings.secret());
        params.push_required("username", username);
        self.do_request(params).await
    }

    /// Disable (lock out) a user account
    pub async fn disable_user(&self, username: &str) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::Disable, self.settings.secret());
        params.push_required("username", username);
        self.do_request(params).await
    }

    /// Re-enable a disabled user account
    pub async fn enable_user(&self, username: &str) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::Enable, self.settings.secret());
        params.push_required("username", username);
        self.do_request(params).await
    }

    /// Update a user account. Every field is optional; only the ones that pass
    /// validation are sent.
    pub async fn update_user(
        &self,
        username: &str,
        attributes: &UserAttributes
    ) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::Update, self.settings.secret());
        params.push_required("username", username);
        params.push_string("password", attributes.password.as_deref());
        params.push_string("name", attributes.name.as_deref());
        params.push_email("email", attributes.email.as_deref());
        params.push_groups("groups", attributes.groups.as_deref());
        self.do_request(params).await
    }

    /// Add a contact to a user's roster
    pub async fn add_roster_item(
        &self,
        username: &str,
        item_jid: &str,
        attributes: &RosterAttributes
    ) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::AddRoster, self.settings.secret());
        params.push_required("username", username);
        params.push_required("item_jid", item_jid);
        params.push_string("name", attributes.name.as_deref());
        params.push_subscription(
            "subscription",
            attributes.subscription,
            &self.settings.subscriptions()
        );
        self.do_request(params).await
    }

    /// Update a contact in a user's roster
    pub async fn update_roster_item(
        &self,
        username: &str,
        item_jid: &str,
        attributes: &RosterAttributes
    ) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::UpdateRoster, self.settings.secret());
        params.push_required("username", username);
        params.push_required("item_jid", item_jid);
        params.push_string("name", attributes.name.as_deref());
        params.push_subscription(
            "subscription",
            attributes.subscription,
            &self.settings.subscriptions()
        );
        self.do_request(params).await
    }

    /// Remove a contact from a user's roster
    pub async fn delete_roster_item(&self, username: &str, item_jid: &str) -> Result<Outcome, Error> {
        let mut params = RequestParameters::new(Operation::DeleteRoster, self.settings.secret());
        params.push_required("username", username);
        params.push_required("item_jid", item_jid);
        self.do_request(params).await
    }
}
