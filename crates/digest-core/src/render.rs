//! Digest rendering.

use crate::{CommandRecord, DigestSettings};
use mail_sink::OutgoingMail;

/// Placeholder replaced with the player name when a digest is rendered.
pub const PLAYER_NAME_PLACEHOLDER: &str = "%playerName%";

/// Timestamp format for digest line items.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Render one player's buffered commands into an outgoing mail.
///
/// The body is the configured template followed by an HTML list with one
/// `timestamp -> command` item per record, in the order the commands were
/// observed.
pub fn render_digest(
    settings: &DigestSettings,
    player: &str,
    records: &[CommandRecord],
) -> OutgoingMail {
    let mut body = settings.body_template.replace(PLAYER_NAME_PLACEHOLDER, player);
    body.push_str("<ul>");
    for record in records {
        body.push_str(&format!(
            "<li>{} -> {}</li>",
            record.at.format(TIMESTAMP_FORMAT),
            record.text
        ));
    }
    body.push_str("</ul>");

    OutgoingMail {
        subject: settings.subject_template.replace(PLAYER_NAME_PLACEHOLDER, player),
        html_body: body,
        to: settings.recipient.clone(),
    }
}
