// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live check-in board streaming.
//!
//! Staff dashboards receive read-only notifications over a WebSocket when a
//! child is checked in or out. Events are informational only: clients must
//! still query `/api/check-ins` for authoritative data, and no commands are
//! accepted over the socket.

use axum::{
    extract::{
        FromRequestParts, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::request::Parts,
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use vine_api::{AuthenticatedActor, AuthorizationService};
use vine_persistence::CheckInRecord;

use crate::AppState;
use crate::error::HttpError;
use crate::session::{QueryParams, authenticate, bearer_token};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live check-in board events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A child was checked in.
    ChildCheckedIn {
        check_in_id: String,
        /// `"member"` or `"visitor"`.
        child_type: String,
        child_name: Option<String>,
        checked_in_by_name: String,
        checked_in_at: String,
    },
    /// A child was checked out.
    ChildCheckedOut {
        check_in_id: String,
        child_name: Option<String>,
        checked_out_by_name: Option<String>,
        checked_out_at: Option<String>,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

impl LiveEvent {
    #[must_use]
    pub fn checked_in(record: &CheckInRecord) -> Self {
        Self::ChildCheckedIn {
            check_in_id: record.check_in.check_in_id.clone(),
            child_type: record.child_type.clone(),
            child_name: record.child_name.clone(),
            checked_in_by_name: record.check_in.checked_in_by_name.clone(),
            checked_in_at: record.check_in.checked_in_at.clone(),
        }
    }

    #[must_use]
    pub fn checked_out(record: &CheckInRecord) -> Self {
        Self::ChildCheckedOut {
            check_in_id: record.check_in.check_in_id.clone(),
            child_name: record.child_name.clone(),
            checked_out_by_name: record.check_in.checked_out_by_name.clone(),
            checked_out_at: record.check_in.checked_out_at.clone(),
        }
    }
}

/// Broadcaster for live events.
///
/// A thin wrapper around `tokio::sync::broadcast` so any number of
/// dashboards can follow the board.
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Without subscribers the event is dropped. Never blocks.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for the live endpoint.
///
/// Browsers cannot set headers on a WebSocket handshake, so the token may
/// also travel as `access_token`.
#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    access_token: Option<String>,
}

/// Extractor for kids staff allowed to follow the board.
pub struct BoardViewer(pub AuthenticatedActor);

impl FromRequestParts<AppState> for BoardViewer {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let QueryParams(query) =
            QueryParams::<LiveQuery>::from_request_parts(parts, state).await?;

        let token: String = match query.access_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => token,
            None => bearer_token(&parts.headers)?,
        };
        let actor: AuthenticatedActor = authenticate(state, &token).await?;
        AuthorizationService::require_kids_staff(&actor, "follow_check_in_board")?;
        Ok(Self(actor))
    }
}

/// Upgrades to a WebSocket and streams live events.
pub async fn live_events_handler(
    BoardViewer(actor): BoardViewer,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
    ws: WebSocketUpgrade,
) -> Response {
    info!(account_id = %actor.account_id, "Check-in board subscription");
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then streams events until the client
/// disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn checked_out_event() -> LiveEvent {
        LiveEvent::ChildCheckedOut {
            check_in_id: String::from("c-1"),
            child_name: Some(String::from("Lucas")),
            checked_out_by_name: Some(String::from("Tia Bia")),
            checked_out_at: Some(String::from("2026-10-18T11:45:00Z")),
        }
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        broadcaster.broadcast(&checked_out_event());
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&checked_out_event());

        assert_eq!(rx1.try_recv().unwrap(), checked_out_event());
        assert!(matches!(
            rx2.try_recv(),
            Ok(LiveEvent::ChildCheckedOut { .. })
        ));
    }

    #[test]
    fn test_event_wire_format() {
        let json: serde_json::Value = serde_json::to_value(checked_out_event()).unwrap();

        assert_eq!(json["type"], "child_checked_out");
        assert_eq!(json["checked_out_by_name"], "Tia Bia");
    }
}
