//! LogEntry: what a caller hands to [`LogVault::log`](crate::LogVault::log).

use logvault_core::constants::DEFAULT_COMPONENT;
use logvault_core::models::Metadata;

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Level name, parsed case-insensitively.
    pub level: String,
    pub message: String,
    /// Raw user id. Only its digest is stored.
    pub user_id: Option<String>,
    pub component: String,
    /// Raw sensitive value. Only its digest is stored, under
    /// `metadata.sensitive_data_hash`.
    pub sensitive_data: Option<String>,
    pub additional_data: Option<Metadata>,
    /// Encrypt the message body at rest.
    pub encrypt: bool,
}

impl LogEntry {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            user_id: None,
            component: DEFAULT_COMPONENT.to_string(),
            sensitive_data: None,
            additional_data: None,
            encrypt: false,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    pub fn sensitive_data(mut self, sensitive: impl Into<String>) -> Self {
        self.sensitive_data = Some(sensitive.into());
        self
    }

    pub fn additional_data(mut self, data: Metadata) -> Self {
        self.additional_data = Some(data);
        self
    }

    /// Add one key to `additional_data`.
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.additional_data
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
        self
    }

    pub fn encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = encrypt;
        self
    }
}
