#[derive(Debug, Deserialize)]
struct RoleChangeRequest {
    caller: String,
    role: Role,
    account: String,
}

#[derive(Debug, Serialize)]
struct RoleChangeResponse {
    schema_version: String,
    role: Role,
    account: String,
    changed: bool,
}

#[derive(Debug, Deserialize)]
struct SetPriceRequest {
    caller: String,
    #[serde(with = "contracts::serde_u128_string")]
    amount: u128,
}

#[derive(Debug, Serialize)]
struct PriceResponse {
    schema_version: String,
    #[serde(with = "contracts::serde_u128_string")]
    current_price: u128,
}

#[derive(Debug, Deserialize)]
struct NotificationsQuery {
    cursor: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct NotificationsResponse {
    schema_version: String,
    realm_id: String,
    notifications: Vec<Notification>,
    next_cursor: Option<usize>,
}

async fn grant_role(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<RoleChangeRequest>,
) -> Result<Json<RoleChangeResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let changed = realm
            .grant_role(&request.caller, request.role, &request.account)
            .map_err(HttpApiError::from_game)?;
        let response = RoleChangeResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            role: request.role,
            account: request.account,
            changed,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn revoke_role(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<RoleChangeRequest>,
) -> Result<Json<RoleChangeResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let changed = realm
            .revoke_role(&request.caller, request.role, &request.account)
            .map_err(HttpApiError::from_game)?;
        let response = RoleChangeResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            role: request.role,
            account: request.account,
            changed,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_current_price(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PriceResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    Ok(Json(PriceResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        current_price: realm.current_price(),
    }))
}

async fn set_current_price(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetPriceRequest>,
) -> Result<Json<PriceResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        realm
            .set_current_price(&request.caller, request.amount)
            .map_err(HttpApiError::from_game)?;
        let response = PriceResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            current_price: realm.current_price(),
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_notifications(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<NotificationsResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;

    let notifications = realm.notifications();
    let (start, end, next_cursor) = paginate(notifications.len(), query.cursor, query.page_size)?;

    Ok(Json(NotificationsResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        realm_id: realm.realm_id().to_string(),
        notifications: notifications[start..end].to_vec(),
        next_cursor,
    }))
}
