#[derive(Clone)]
struct AppState {
    inner: std::sync::Arc<Mutex<ServerInner>>,
    stream_tx: broadcast::Sender<StreamMessage>,
}

impl AppState {
    fn new() -> Self {
        let (stream_tx, _) = broadcast::channel(4096);
        Self {
            inner: std::sync::Arc::new(Mutex::new(ServerInner::default())),
            stream_tx,
        }
    }
}

#[derive(Debug, Default)]
struct ServerInner {
    realm: Option<RealmApi>,
    emitted_notification_count: usize,
}

fn require_realm<'a>(inner: &'a ServerInner, realm_id: &str) -> Result<&'a RealmApi, HttpApiError> {
    let Some(realm) = inner.realm.as_ref() else {
        return Err(HttpApiError::realm_not_found(realm_id, None));
    };

    if realm.realm_id() != realm_id {
        return Err(HttpApiError::realm_not_found(
            realm_id,
            Some(realm.realm_id()),
        ));
    }

    Ok(realm)
}

fn require_realm_mut<'a>(
    inner: &'a mut ServerInner,
    realm_id: &str,
) -> Result<&'a mut RealmApi, HttpApiError> {
    let active_realm_id = inner
        .realm
        .as_ref()
        .map(|realm| realm.realm_id().to_string());
    let Some(realm) = inner.realm.as_mut() else {
        return Err(HttpApiError::realm_not_found(realm_id, None));
    };

    if realm.realm_id() != realm_id {
        return Err(HttpApiError::realm_not_found(
            realm_id,
            active_realm_id.as_deref(),
        ));
    }

    Ok(realm)
}

fn collect_delta_messages(inner: &mut ServerInner) -> Vec<StreamMessage> {
    let mut messages = Vec::new();

    let Some(realm) = inner.realm.as_ref() else {
        return messages;
    };

    let new_notifications = &realm.notifications()[inner.emitted_notification_count..];
    for notification in new_notifications {
        messages.push(StreamMessage::notification_appended(notification));
    }
    inner.emitted_notification_count = realm.notifications().len();

    messages
}

fn broadcast_messages(state: &AppState, messages: Vec<StreamMessage>) {
    for message in messages {
        let _ = state.stream_tx.send(message);
    }
}
