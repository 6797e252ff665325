//! Digest settings shared by the scheduler and the renderer.

use crate::CommandFilter;
use std::time::Duration;

/// Placeholder replaced with the configured server name when settings are built.
pub const SERVER_NAME_PLACEHOLDER: &str = "%serverName%";

/// Runtime settings for digest generation.
///
/// One immutable value per configuration load. A reload swaps in a whole
/// new value; nothing mutates settings in place.
#[derive(Debug, Clone)]
pub struct DigestSettings {
    /// Configured server name, as substituted into the templates.
    pub server_name: String,
    /// Subject template, server name already expanded.
    pub subject_template: String,
    /// Body template prepended to the command list, server name already expanded.
    pub body_template: String,
    /// Digest recipient address.
    pub recipient: String,
    /// How long a player's first buffered command waits before the digest goes out.
    pub window: Duration,
    /// Admission filter for incoming command events.
    pub filter: CommandFilter,
}

impl DigestSettings {
    /// Build settings from raw template strings.
    ///
    /// The server name is substituted into both templates here, once. Only
    /// `%playerName%` remains for render time.
    pub fn new(
        server_name: &str,
        subject_template: &str,
        body_template: &str,
        recipient: &str,
        window: Duration,
        filter: CommandFilter,
    ) -> Self {
        Self {
            server_name: server_name.to_string(),
            subject_template: subject_template.replace(SERVER_NAME_PLACEHOLDER, server_name),
            body_template: body_template.replace(SERVER_NAME_PLACEHOLDER, server_name),
            recipient: recipient.to_string(),
            window,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_name_expanded_in_both_templates() {
        let settings = DigestSettings::new(
            "Skyblock",
            "[%serverName%] report",
            "Activity on %serverName% (%serverName%):",
            "ops@example.com",
            Duration::from_secs(60),
            CommandFilter::default(),
        );
        assert_eq!(settings.server_name, "Skyblock");
        assert_eq!(settings.subject_template, "[Skyblock] report");
        assert_eq!(settings.body_template, "Activity on Skyblock (Skyblock):");
    }

    #[test]
    fn test_player_placeholder_left_untouched() {
        let settings = DigestSettings::new(
            "Skyblock",
            "%playerName% on %serverName%",
            "body",
            "ops@example.com",
            Duration::from_secs(60),
            CommandFilter::default(),
        );
        assert_eq!(settings.subject_template, "%playerName% on Skyblock");
    }
}
