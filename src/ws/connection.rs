//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered live-feed
//! notifications.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::{SubscriptionManager, WILDCARD};
use crate::domain::{FeedEvent, Severity};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers each one.
/// - Forwards matching notifications from the [`broadcast::Receiver`].
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<FeedEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs);
                        if let Some(json) = reply
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(feed_event) => {
                        if !subs.matches(&feed_event) {
                            continue;
                        }
                        let Some(json) = event_message(&feed_event) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn event_message(event: &FeedEvent) -> Option<String> {
    let payload = serde_json::to_value(event).ok()?;
    let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
    serde_json::to_string(&msg).ok()
}

/// Handles a text frame from the client, returning the JSON reply.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error("", 400, "malformed JSON")).ok();
    };

    let command = (msg.msg_type == WsMessageType::Command)
        .then(|| serde_json::from_value::<WsCommand>(msg.payload).ok())
        .flatten();
    let Some(command) = command else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let reply = match command {
        WsCommand::Subscribe { severities } => match parse_severities(&severities) {
            Ok((parsed, wildcard)) => {
                subs.subscribe(&parsed, wildcard);
                WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::json!({
                        "subscribed": parsed,
                        "severities": subs.severities(),
                        "wildcard": subs.is_subscribed_all(),
                    }),
                )
            }
            Err(bad) => WsMessage::error(msg.id, 400, &format!("invalid severity: {bad}")),
        },
        WsCommand::Unsubscribe { severities } => match parse_severities(&severities) {
            Ok((parsed, wildcard)) => {
                subs.unsubscribe(&parsed, wildcard);
                WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::json!({
                        "unsubscribed": parsed,
                        "severities": subs.severities(),
                        "wildcard": subs.is_subscribed_all(),
                    }),
                )
            }
            Err(bad) => WsMessage::error(msg.id, 400, &format!("invalid severity: {bad}")),
        },
    };
    serde_json::to_string(&reply).ok()
}

/// Splits selectors into severities and the wildcard flag. Returns the
/// first unknown name on failure.
fn parse_severities(raw: &[String]) -> Result<(Vec<Severity>, bool), String> {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut wildcard = false;
    for name in raw {
        if name == WILDCARD {
            wildcard = true;
        } else {
            parsed.push(name.parse::<Severity>().map_err(|_| name.clone())?);
        }
    }
    Ok((parsed, wildcard))
}
