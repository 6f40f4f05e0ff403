#[derive(Debug, Deserialize)]
struct MintFreeRequest {
    account: String,
}

#[derive(Debug, Deserialize)]
struct MintRequest {
    account: String,
    #[serde(with = "contracts::serde_u128_string")]
    payment: u128,
}

#[derive(Debug, Serialize)]
struct AvatarResponse {
    schema_version: String,
    avatar: Avatar,
}

#[derive(Debug, Deserialize)]
struct AddAttributePointsRequest {
    caller: String,
    amount: u64,
}

#[derive(Debug, Deserialize)]
struct SetAttributesRequest {
    caller: String,
    attribute: Attribute,
    amount: u64,
}

#[derive(Debug, Serialize)]
struct AttributeUpdateResponse {
    schema_version: String,
    avatar_id: u64,
    attribute: Option<Attribute>,
    new_value: u64,
}

#[derive(Debug, Deserialize)]
struct LearnSkillRequest {
    caller: String,
    skill_id: u64,
}

#[derive(Debug, Serialize)]
struct LearnSkillResponse {
    schema_version: String,
    avatar_id: u64,
    skill_id: u64,
    newly_learned: bool,
}

async fn mint_free_avatar(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<MintFreeRequest>,
) -> Result<Json<AvatarResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let avatar = realm
            .mint_free_avatar(&request.account)
            .map_err(HttpApiError::from_game)?;
        let response = AvatarResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn mint_avatar(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> Result<Json<AvatarResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let avatar = realm
            .mint_avatar(&request.account, request.payment)
            .map_err(HttpApiError::from_game)?;
        let response = AvatarResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_avatar(
    Path((realm_id, avatar_id)): Path<(String, u64)>,
    State(state): State<AppState>,
) -> Result<Json<AvatarResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    let avatar = realm
        .get_avatar(avatar_id)
        .map_err(HttpApiError::from_game)?
        .clone();
    Ok(Json(AvatarResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        avatar,
    }))
}

async fn add_attribute_points(
    Path((realm_id, avatar_id)): Path<(String, u64)>,
    State(state): State<AppState>,
    Json(request): Json<AddAttributePointsRequest>,
) -> Result<Json<AttributeUpdateResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let balance = realm
            .add_attribute_points(&request.caller, avatar_id, request.amount)
            .map_err(HttpApiError::from_game)?;
        let response = AttributeUpdateResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar_id,
            attribute: None,
            new_value: balance,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn set_attributes(
    Path((realm_id, avatar_id)): Path<(String, u64)>,
    State(state): State<AppState>,
    Json(request): Json<SetAttributesRequest>,
) -> Result<Json<AttributeUpdateResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let new_value = realm
            .set_attributes(&request.caller, avatar_id, request.attribute, request.amount)
            .map_err(HttpApiError::from_game)?;
        let response = AttributeUpdateResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar_id,
            attribute: Some(request.attribute),
            new_value,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn learn_skill(
    Path((realm_id, avatar_id)): Path<(String, u64)>,
    State(state): State<AppState>,
    Json(request): Json<LearnSkillRequest>,
) -> Result<Json<LearnSkillResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let newly_learned = realm
            .learn_skill(&request.caller, avatar_id, request.skill_id)
            .map_err(HttpApiError::from_game)?;
        let response = LearnSkillResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar_id,
            skill_id: request.skill_id,
            newly_learned,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}
