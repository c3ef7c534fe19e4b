//! Sign-in, sign-up and sign-out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::urls::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::{ACCESS_COOKIE, clear_session, resolve_user, store_session};

const CONFIRM_EMAIL_NOTICE: &str =
    "Account created. Check your email to confirm it, then sign in.";

/// Template for the sign-in / sign-up page.
#[derive(Template, WebTemplate)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub sign_up: bool,
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthTemplate {
    fn with_error(sign_up: bool, email: String, error: impl Into<String>) -> Self {
        Self {
            sign_up,
            email,
            error: Some(error.into()),
            notice: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthPageQuery {
    #[serde(default)]
    pub mode: Option<String>,
}

/// Credentials posted by the auth form.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Renders the auth page, or sends signed-in users to the dashboard.
///
/// # Endpoint
///
/// `GET /auth[?mode=signup]`
pub async fn auth_page_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<AuthPageQuery>,
) -> Response {
    if let Ok((_, jar)) = resolve_user(&state, jar).await {
        return (jar, Redirect::to("/")).into_response();
    }

    AuthTemplate {
        sign_up: query.mode.as_deref() == Some("signup"),
        email: String::new(),
        error: None,
        notice: None,
    }
    .into_response()
}

/// Signs in and stores the session cookies.
///
/// # Endpoint
///
/// `POST /auth/sign-in` (form: `email`, `password`)
///
/// Redirects to `/` on success; re-renders the form with the error otherwise.
pub async fn sign_in_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthForm>,
) -> Response {
    if let Err(e) = form.validate() {
        let err = AppError::from(e);
        return rejected(AuthTemplate::with_error(false, form.email, err.to_string()), &err);
    }

    match state.auth_service.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let jar = store_session(jar, &session, state.cookie_secure);
            (jar, Redirect::to("/")).into_response()
        }
        Err(err) => rejected(AuthTemplate::with_error(false, form.email, err.to_string()), &err),
    }
}

/// Creates an account.
///
/// # Endpoint
///
/// `POST /auth/sign-up` (form: `email`, `password`)
///
/// When the auth service issues a session right away the user lands on the
/// dashboard; when it requires email confirmation the sign-in form is shown
/// with a notice.
pub async fn sign_up_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthForm>,
) -> Response {
    if let Err(e) = form.validate() {
        let err = AppError::from(e);
        return rejected(AuthTemplate::with_error(true, form.email, err.to_string()), &err);
    }

    match state.auth_service.sign_up(&form.email, &form.password).await {
        Ok(Some(session)) => {
            let jar = store_session(jar, &session, state.cookie_secure);
            (jar, Redirect::to("/")).into_response()
        }
        Ok(None) => AuthTemplate {
            sign_up: false,
            email: form.email,
            error: None,
            notice: Some(CONFIRM_EMAIL_NOTICE.to_string()),
        }
        .into_response(),
        Err(err) => rejected(AuthTemplate::with_error(true, form.email, err.to_string()), &err),
    }
}

/// Signs out and clears the session cookies.
///
/// # Endpoint
///
/// `POST /logout`
///
/// # Errors
///
/// Answers "Failed to sign out" when the auth service call fails; the cookies
/// are kept so the user can retry.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if let Some(token) = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()) {
        state.auth_service.sign_out(&token).await?;
    }

    Ok((
        clear_session(jar),
        Json(MessageResponse {
            message: "Signed out",
        }),
    ))
}

fn rejected(template: AuthTemplate, err: &AppError) -> Response {
    let status = match err.status_code() {
        StatusCode::INTERNAL_SERVER_ERROR => StatusCode::BAD_GATEWAY,
        status => status,
    };

    (status, template).into_response()
}
