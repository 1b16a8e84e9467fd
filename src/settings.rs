//! Client Settings Store
//!
//! A permissive name-keyed settings map backing the UserService client. Keys are
//! free-form: `set` inserts or overwrites unconditionally and `get` never fails,
//! it just returns `None` for absent keys. The recognized keys are `host`,
//! `port`, `plugin`, `secret`, `use_curl`, `use_ssl` and `subscriptions`; typed
//! accessors fall back to the documented default when a key is missing or holds
//! a value of the wrong shape.
//!
//! The store carries no internal synchronization. Sharing it across tasks while
//! requests are in flight is the caller's responsibility.

use std::collections::HashMap;

use serde::{ Deserialize, Serialize };
use url::Url;

use crate::errors::Error;

/// Default host the OpenFire server is expected on
pub const DEFAULT_HOST: &str = "localhost";
/// Default OpenFire admin console port
pub const DEFAULT_PORT: u16 = 9090;
/// Fixed path of the UserService plugin endpoint
pub const DEFAULT_PLUGIN_PATH: &str = "/plugins/userService/userservice";
/// Placeholder shared secret, matching the plugin's own default
pub const DEFAULT_SECRET: &str = "SuperSecret";
/// Subscription codes the plugin accepts: remove, none, one-way, mutual
pub const DEFAULT_SUBSCRIPTIONS: [i32; 4] = [-1, 0, 1, 2];

/// A single setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Str(String),
    Int(i64),
    Bool(bool),
    IntList(Vec<i32>),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u16> for SettingValue {
    fn from(value: u16) -> Self {
        SettingValue::Int(value as i64)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<Vec<i32>> for SettingValue {
    fn from(value: Vec<i32>) -> Self {
        SettingValue::IntList(value)
    }
}

/// Mutable configuration for the UserService client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    values: HashMap<String, SettingValue>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSettings {
    /// Create a settings store populated with the plugin defaults
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert("host".to_string(), SettingValue::from(DEFAULT_HOST));
        values.insert("port".to_string(), SettingValue::from(DEFAULT_PORT));
        values.insert("plugin".to_string(), SettingValue::from(DEFAULT_PLUGIN_PATH));
        values.insert("secret".to_string(), SettingValue::from(DEFAULT_SECRET));
        values.insert("use_curl".to_string(), SettingValue::Bool(true));
        values.insert("use_ssl".to_string(), SettingValue::Bool(false));
        values.insert(
            "subscriptions".to_string(),
            SettingValue::IntList(DEFAULT_SUBSCRIPTIONS.to_vec())
        );
        Self { values }
    }

    /// Look up a setting by name. Absent keys yield `None`, never an error.
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    /// Insert or overwrite a setting. No schema enforcement: unknown keys are
    /// stored as-is.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Server hostname
    pub fn host(&self) -> &str {
        match self.values.get("host") {
            Some(SettingValue::Str(s)) => s,
            _ => DEFAULT_HOST,
        }
    }

    /// Server port
    pub fn port(&self) -> u16 {
        match self.values.get("port") {
            Some(SettingValue::Int(p)) => u16::try_from(*p).unwrap_or(DEFAULT_PORT),
            // Port stored as a string is tolerated, the original settings kept
            // it that way.
            Some(SettingValue::Str(s)) => s.parse().unwrap_or(DEFAULT_PORT),
            _ => DEFAULT_PORT,
        }
    }

    /// Plugin endpoint path
    pub fn plugin(&self) -> &str {
        match self.values.get("plugin") {
            Some(SettingValue::Str(s)) => s,
            _ => DEFAULT_PLUGIN_PATH,
        }
    }

    /// Shared secret sent with every request
    pub fn secret(&self) -> &str {
        match self.values.get("secret") {
            Some(SettingValue::Str(s)) => s,
            _ => DEFAULT_SECRET,
        }
    }

    /// Whether to use the full HTTP client transport rather than the stream
    /// fallback
    pub fn prefers_http_client(&self) -> bool {
        match self.values.get("use_curl") {
            Some(SettingValue::Bool(b)) => *b,
            _ => true,
        }
    }

    /// Whether requests go over HTTPS
    pub fn use_ssl(&self) -> bool {
        match self.values.get("use_ssl") {
            Some(SettingValue::Bool(b)) => *b,
            _ => false,
        }
    }

    /// Subscription codes accepted by the roster operations
    pub fn subscriptions(&self) -> Vec<i32> {
        match self.values.get("subscriptions") {
            Some(SettingValue::IntList(list)) => list.clone(),
            _ => DEFAULT_SUBSCRIPTIONS.to_vec(),
        }
    }

    /// Build the plugin endpoint URL from the current settings
    pub fn endpoint_url(&self) -> Result<Url, Error> {
        let scheme = if self.use_ssl() { "https" } else { "http" };
        let url = format!("{}://{}:{}{}", scheme, self.host(), self.port(), self.plugin());
        Ok(Url::parse(&url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_plugin() {
        let settings = ClientSettings::new();
        assert_eq!(settings.host(), "localhost");
        assert_eq!(settings.port(), 9090);
        assert_eq!(settings.plugin(), "/plugins/userService/userservice");
        assert_eq!(settings.secret(), "SuperSecret");
        assert!(settings.prefers_http_client());
        assert!(!settings.use_ssl());
        assert_eq!(settings.subscriptions(), vec![-1, 0, 1, 2]);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut settings = ClientSettings::new();
        settings.set("host", "example.org");
        assert_eq!(settings.get("host"), Some(&SettingValue::from("example.org")));
        assert_eq!(settings.host(), "example.org");
    }

    #[test]
    fn unknown_keys_are_stored_and_absent_keys_are_none() {
        let mut settings = ClientSettings::new();
        assert_eq!(settings.get("nonexistent"), None);
        settings.set("custom_flag", true);
        assert_eq!(settings.get("custom_flag"), Some(&SettingValue::Bool(true)));
    }

    #[test]
    fn endpoint_url_reflects_ssl_setting() {
        let mut settings = ClientSettings::new();
        let url = settings.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:9090/plugins/userService/userservice");

        settings.set("use_ssl", true);
        settings.set("host", "xmpp.example.org");
        settings.set("port", 9091u16);
        let url = settings.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "https://xmpp.example.org:9091/plugins/userService/userservice");
    }

    #[test]
    fn string_port_is_tolerated() {
        let mut settings = ClientSettings::new();
        settings.set("port", "9091");
        assert_eq!(settings.port(), 9091);
        settings.set("port", "not a port");
        assert_eq!(settings.port(), 9090);
    }
}
