async fn stream_realm(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, HttpApiError> {
    let initial_message = {
        let inner = state.inner.lock().await;
        let status = require_realm(&inner, &realm_id)?.status();
        StreamMessage::realm_status(&status)
    };

    Ok(ws.on_upgrade(move |socket| stream_socket(socket, state, realm_id, initial_message)))
}

async fn stream_socket(
    mut socket: WebSocket,
    state: AppState,
    realm_id: String,
    initial_message: StreamMessage,
) {
    if send_stream_message(&mut socket, &initial_message)
        .await
        .is_err()
    {
        return;
    }

    let mut rx = state.stream_tx.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => {
                        break;
                    }
                    _ => {}
                }
            }
            outgoing = rx.recv() => {
                match outgoing {
                    Ok(message) => {
                        if message.realm_id != realm_id {
                            continue;
                        }

                        if send_stream_message(&mut socket, &message).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        let warning = StreamMessage::warning(
                            &realm_id,
                            format!("stream client lagged and skipped {skipped} message(s)"),
                        );

                        if send_stream_message(&mut socket, &warning).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }
}

async fn send_stream_message(
    socket: &mut WebSocket,
    message: &StreamMessage,
) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(message).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload.into())).await
}

#[derive(Debug, Clone, Serialize)]
struct StreamMessage {
    schema_version: String,
    #[serde(rename = "type")]
    message_type: String,
    realm_id: String,
    reconnect_token: String,
    payload: Value,
}

impl StreamMessage {
    fn realm_status(status: &RealmStatus) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            message_type: "realm.status".to_string(),
            realm_id: status.realm_id.clone(),
            reconnect_token: reconnect_token(status.notification_count, "status"),
            payload: json!(status),
        }
    }

    fn notification_appended(notification: &Notification) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            message_type: "notification.appended".to_string(),
            realm_id: notification.realm_id.clone(),
            reconnect_token: reconnect_token(
                notification.notification_id as usize,
                "notification",
            ),
            payload: json!(notification),
        }
    }

    fn warning(realm_id: &str, warning: String) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            message_type: "warning".to_string(),
            realm_id: realm_id.to_string(),
            reconnect_token: reconnect_token(0, "warning"),
            payload: json!({ "message": warning }),
        }
    }
}
