//! Client settings shared by every transport.

use crate::security::SecuritySettingsProvider;
use std::fmt;
use std::time::Duration;

/// Settings held by a built client.
///
/// Immutable once created, except for the image store connection string.
#[derive(Clone, Default)]
pub struct ClientSettings {
    security_settings: Option<SecuritySettingsProvider>,
    client_timeout: Option<Duration>,
    image_store_connection_string: Option<String>,
}

impl ClientSettings {
    pub fn new(
        security_settings: Option<SecuritySettingsProvider>,
        client_timeout: Option<Duration>,
    ) -> Self {
        Self {
            security_settings,
            client_timeout,
            image_store_connection_string: None,
        }
    }

    pub fn with_image_store_connection_string(mut self, value: impl Into<String>) -> Self {
        self.image_store_connection_string = Some(value.into());
        self
    }

    pub fn security_settings(&self) -> Option<&SecuritySettingsProvider> {
        self.security_settings.as_ref()
    }

    /// Overall client-side timeout for one HTTP exchange.
    pub fn client_timeout(&self) -> Option<Duration> {
        self.client_timeout
    }

    pub fn image_store_connection_string(&self) -> Option<&str> {
        self.image_store_connection_string.as_deref()
    }

    pub fn set_image_store_connection_string(&mut self, value: Option<String>) {
        self.image_store_connection_string = value;
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("security_settings", &self.security_settings.is_some())
            .field("client_timeout", &self.client_timeout)
            .field(
                "image_store_connection_string",
                &self.image_store_connection_string,
            )
            .finish()
    }
}
