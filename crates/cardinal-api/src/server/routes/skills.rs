#[derive(Debug, Deserialize)]
struct CreateSkillRequest {
    caller: String,
    name: String,
    flag: SkillFlag,
}

#[derive(Debug, Serialize)]
struct SkillResponse {
    schema_version: String,
    skill: Skill,
}

#[derive(Debug, Deserialize)]
struct SetRequirementRequest {
    caller: String,
    attribute: Attribute,
    min_value: u64,
}

async fn create_skill(
    Path(realm_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CreateSkillRequest>,
) -> Result<Json<SkillResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        let skill = realm
            .create_new_skill(&request.caller, &request.name, request.flag)
            .map_err(HttpApiError::from_game)?;
        let response = SkillResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            skill,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}

async fn get_skill(
    Path((realm_id, skill_id)): Path<(String, u64)>,
    State(state): State<AppState>,
) -> Result<Json<SkillResponse>, HttpApiError> {
    let inner = state.inner.lock().await;
    let realm = require_realm(&inner, &realm_id)?;
    let skill = realm
        .get_skill(skill_id)
        .map_err(HttpApiError::from_game)?
        .clone();
    Ok(Json(SkillResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        skill,
    }))
}

async fn set_skill_requirement(
    Path((realm_id, skill_id)): Path<(String, u64)>,
    State(state): State<AppState>,
    Json(request): Json<SetRequirementRequest>,
) -> Result<Json<SkillResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let realm = require_realm_mut(&mut inner, &realm_id)?;
        realm
            .set_skill_requirement(&request.caller, skill_id, request.attribute, request.min_value)
            .map_err(HttpApiError::from_game)?;
        let skill = realm
            .get_skill(skill_id)
            .map_err(HttpApiError::from_game)?
            .clone();
        let response = SkillResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            skill,
        };
        (response, collect_delta_messages(&mut inner))
    };

    broadcast_messages(&state, messages);
    Ok(Json(response))
}
