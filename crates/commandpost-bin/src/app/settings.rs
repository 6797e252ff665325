//! Mapping from the on-disk config to runtime digest settings.

use commandpost_config::Config;
use digest_core::{CommandFilter, DigestSettings};
use std::time::Duration;

/// Build scheduler settings from a validated configuration.
pub fn settings_from_config(config: &Config) -> DigestSettings {
    let filter = CommandFilter::new(&config.whitelist, &config.blacklist, config.log_ops);
    DigestSettings::new(
        &config.server_name,
        &config.email_subject,
        &config.email_body,
        &config.mail_to,
        Duration::from_secs(config.window_minutes.saturating_mul(60)),
        filter,
    )
}
