#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateRealmRequest {
    Config(GameConfig),
    WithOptions(CreateRealmOptions),
}

#[derive(Debug, Deserialize)]
struct CreateRealmOptions {
    config: GameConfig,
}

#[derive(Debug, Serialize)]
struct CreateRealmResponse {
    schema_version: String,
    realm_id: String,
    status: RealmStatus,
    replaced_existing_realm: bool,
}

async fn create_realm(
    State(state): State<AppState>,
    Json(request): Json<CreateRealmRequest>,
) -> Result<Json<CreateRealmResponse>, HttpApiError> {
    let config = match request {
        CreateRealmRequest::Config(config) => config,
        CreateRealmRequest::WithOptions(options) => options.config,
    };

    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let replaced_existing_realm = inner.realm.is_some();

        let realm = RealmApi::from_config(config);
        let status = realm.status();
        inner.realm = Some(realm);
        inner.emitted_notification_count = 0;

        let mut messages = Vec::new();
        if replaced_existing_realm {
            messages.push(StreamMessage::warning(
                &status.realm_id,
                "existing realm state was replaced by POST /realms".to_string(),
            ));
        }
        messages.push(StreamMessage::realm_status(&status));

        (
            CreateRealmResponse {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                realm_id: status.realm_id.clone(),
                status,
                replaced_existing_realm,
            },
            messages,
        )
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_status(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RealmStatus>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    Ok(Json(realm.status()))
}
