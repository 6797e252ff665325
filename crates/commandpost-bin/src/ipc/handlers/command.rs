//! Command event handler.

use crate::app::DaemonState;
use commandpost_ipc::{error_codes, IpcServer, Method, Response};
use serde_json::Value;
use tracing::{debug, info};

/// Parsed `command.observe` parameters.
#[derive(Debug, PartialEq, Eq)]
struct ObserveParams {
    player: String,
    command: String,
    is_op: bool,
}

/// Extract the observe payload from request params.
///
/// `is_op` is optional and defaults to false; the host only sets it for
/// operator players.
fn parse_observe_params(params: Option<&Value>) -> Result<ObserveParams, &'static str> {
    let params = params.ok_or("params are required")?;
    let player = params
        .get("player")
        .and_then(|v| v.as_str())
        .ok_or("player is required")?;
    let command = params
        .get("command")
        .and_then(|v| v.as_str())
        .ok_or("command is required")?;
    let is_op = params.get("is_op").and_then(|v| v.as_bool()).unwrap_or(false);

    Ok(ObserveParams {
        player: player.to_string(),
        command: command.to_string(),
        is_op,
    })
}

/// Register the command observation handler.
///
/// The game server host reports every executed command here; the
/// scheduler decides whether it is recorded.
pub async fn register(server: &IpcServer, state: DaemonState) {
    server
        .register_handler(Method::CommandObserve, move |req| {
            let scheduler = state.scheduler.clone();
            async move {
                let params = match parse_observe_params(req.params.as_ref()) {
                    Ok(params) => params,
                    Err(message) => {
                        return Response::error(&req.id, error_codes::INVALID_PARAMS, message);
                    }
                };

                let admitted =
                    scheduler.observe_command(&params.player, &params.command, params.is_op);
                debug!(player = %params.player, admitted = admitted, "Command event observed");

                Response::success(&req.id, serde_json::json!({ "admitted": admitted }))
            }
        })
        .await;

    info!("Registered command handlers");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_observe_params_accepts_full_payload() {
        let params = serde_json::json!({
            "player": "alice",
            "command": "/tp alice spawn",
            "is_op": true
        });

        let parsed = parse_observe_params(Some(&params)).expect("valid payload");
        assert_eq!(
            parsed,
            ObserveParams {
                player: "alice".to_string(),
                command: "/tp alice spawn".to_string(),
                is_op: true,
            }
        );
    }

    #[test]
    fn parse_observe_params_defaults_is_op_to_false() {
        let params = serde_json::json!({
            "player": "alice",
            "command": "/seed"
        });

        let parsed = parse_observe_params(Some(&params)).expect("valid payload");
        assert!(!parsed.is_op);
    }

    #[test]
    fn parse_observe_params_rejects_missing_fields() {
        assert_eq!(parse_observe_params(None), Err("params are required"));

        let no_command = serde_json::json!({ "player": "alice" });
        assert_eq!(
            parse_observe_params(Some(&no_command)),
            Err("command is required")
        );

        let no_player = serde_json::json!({ "command": "/seed" });
        assert_eq!(
            parse_observe_params(Some(&no_player)),
            Err("player is required")
        );
    }
}
