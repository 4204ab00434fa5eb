//! Configuration for the notification subsystem
//!
//! Both delivery paths normalize payloads against the same configuration, so
//! the placeholder policy lives here rather than in the contexts that apply it.

/// Notification subsystem configuration
///
/// # Example
///
/// ```rust,ignore
/// use brewpos_notify::NotifyConfig;
///
/// let config = NotifyConfig::new()
///     .app_root_url("/dashboard")
///     .channel_name("brewpos.staging.notifications");
/// ```
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Title substituted when the push payload carries none
    pub default_title: String,
    /// Body substituted when the push payload carries none
    pub default_body: String,
    /// Icon shown on system notifications when the payload carries no image
    pub default_icon: String,
    /// Navigation target used when a notification carries no deep link
    pub app_root_url: String,
    /// Well-known relay channel name shared by both execution contexts
    pub channel_name: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            default_title: "New notification".to_string(),
            default_body: "You have a new message.".to_string(),
            default_icon: "/icons/notification.png".to_string(),
            app_root_url: "/".to_string(),
            channel_name: "brewpos.notifications".to_string(),
        }
    }
}

impl NotifyConfig {
    /// Create a configuration with the default placeholder policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder title
    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the placeholder body
    pub fn default_body(mut self, body: impl Into<String>) -> Self {
        self.default_body = body.into();
        self
    }

    /// Set the fallback system notification icon
    pub fn default_icon(mut self, icon: impl Into<String>) -> Self {
        self.default_icon = icon.into();
        self
    }

    /// Set the application root used when no deep link is present
    pub fn app_root_url(mut self, url: impl Into<String>) -> Self {
        self.app_root_url = url.into();
        self
    }

    /// Set the relay channel name
    pub fn channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }
}
