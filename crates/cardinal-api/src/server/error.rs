#[derive(Debug)]
pub enum ServerError {
    Io(std::io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "server io error: {err}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug)]
struct HttpApiError {
    status: StatusCode,
    error: ApiError,
}

impl HttpApiError {
    fn realm_not_found(requested_realm_id: &str, active_realm_id: Option<&str>) -> Self {
        let details = active_realm_id.map(|active| {
            format!("requested_realm_id={requested_realm_id} active_realm_id={active}")
        });
        Self {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new(
                ErrorCode::RealmNotFound,
                "realm_id does not match an active realm",
                details,
            ),
        }
    }

    fn invalid_query(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(ErrorCode::InvalidQuery, message, details),
        }
    }

    fn from_game(err: GameError) -> Self {
        let status = match err {
            GameError::Unauthorized | GameError::NotOwner => StatusCode::FORBIDDEN,
            GameError::NotFound => StatusCode::NOT_FOUND,
            GameError::EventCountOutOfRange(_) => StatusCode::BAD_REQUEST,
            GameError::AlreadyClaimed
            | GameError::InsufficientPoints
            | GameError::RequirementNotMet
            | GameError::AvatarBusy
            | GameError::DuplicateName(_)
            | GameError::UnknownTier(_)
            | GameError::InsufficientPayment => StatusCode::CONFLICT,
        };
        Self {
            status,
            error: ApiError::new(err.error_code(), err.to_string(), None),
        }
    }
}

impl IntoResponse for HttpApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}
