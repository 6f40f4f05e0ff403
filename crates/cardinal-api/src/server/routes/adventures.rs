#[derive(Debug, Deserialize)]
struct DoAdventureRequest {
    caller: String,
    avatar_id: u64,
    duration_tier: u64,
    event_count: u64,
}

#[derive(Debug, Serialize)]
struct AdventureResponse {
    schema_version: String,
    outcome: AdventureOutcome,
}

#[derive(Debug, Deserialize)]
struct CreateAdventureEventRequest {
    caller: String,
    event_type: AdventureEventType,
    #[serde(with = "contracts::serde_u128_string")]
    reward_cor: u128,
    reward_exp: u64,
}

#[derive(Debug, Serialize)]
struct EventResponse {
    schema_version: String,
    event: AdventureEvent,
}

#[derive(Debug, Serialize)]
struct AdventureEventsResponse {
    schema_version: String,
    adventure_id: u64,
    event_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct SetRewardCapRequest {
    caller: String,
    tier: u64,
    #[serde(with = "contracts::serde_u128_string")]
    amount: u128,
}

#[derive(Debug, Serialize)]
struct RewardCapResponse {
    schema_version: String,
    tier: u64,
    caps: RewardCaps,
}

async fn do_adventure(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<DoAdventureRequest>,
) -> Result<Json<AdventureResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let outcome = realm
            .do_adventure(
                &request.caller,
                request.avatar_id,
                request.duration_tier,
                request.event_count,
            )
            .map_err(HttpApiError::from_game)?;
        let response = AdventureResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            outcome,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn create_adventure_event(
    Path((realm_id, adventure_id)): Path<(String, u64)>,
    State(state): State<AppState>,
    Json(request): Json<CreateAdventureEventRequest>,
) -> Result<Json<EventResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let event_id = realm
            .create_adventure_event(
                &request.caller,
                adventure_id,
                request.event_type,
                request.reward_cor,
                request.reward_exp,
            )
            .map_err(HttpApiError::from_game)?;
        let event = realm
            .get_event(event_id)
            .map_err(HttpApiError::from_game)?
            .clone();
        let response = EventResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            event,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_adventure_events(
    Path((realm_id, adventure_id)): Path<(String, u64)>,
    State(state): State<AppState>,
) -> Result<Json<AdventureEventsResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    let event_ids = realm
        .get_adventure_events(adventure_id)
        .map_err(HttpApiError::from_game)?;
    Ok(Json(AdventureEventsResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        adventure_id,
        event_ids,
    }))
}

async fn get_event(
    Path((realm_id, event_id)): Path<(String, u64)>,
    State(state): State<AppState>,
) -> Result<Json<EventResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    let event = realm
        .get_event(event_id)
        .map_err(HttpApiError::from_game)?
        .clone();
    Ok(Json(EventResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        event,
    }))
}

async fn set_max_reward_cor(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetRewardCapRequest>,
) -> Result<Json<RewardCapResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let caps = realm
            .set_max_reward_cor(&request.caller, request.tier, request.amount)
            .map_err(HttpApiError::from_game)?;
        let response = RewardCapResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            tier: request.tier,
            caps,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn set_max_reward_exp(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetRewardCapRequest>,
) -> Result<Json<RewardCapResponse>, HttpApiError> {
    let amount = u64::try_from(request.amount).map_err(|_| {
        HttpApiError::invalid_query(
            "exp cap exceeds u64 range",
            Some(format!("amount={}", request.amount)),
        )
    })?;

    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let caps = realm
            .set_max_reward_exp(&request.caller, request.tier, amount)
            .map_err(HttpApiError::from_game)?;
        let response = RewardCapResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            tier: request.tier,
            caps,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}
