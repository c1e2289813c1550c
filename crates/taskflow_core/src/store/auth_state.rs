//! Session slice: state, actions and reducer.

use super::ActionName;
use crate::model::user::{RegisterRequest, User};

/// Message recorded when a stored session is no longer accepted.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login { identifier: String },
    LoginSuccess(User),
    LoginFailure(String),
    Register(RegisterRequest),
    RegisterSuccess(User),
    RegisterFailure(String),
    Logout,
    LogoutSuccess,
    LogoutFailure(String),
    CheckAuth,
    TokenExpired,
    ClearError,
}

impl ActionName for AuthAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "auth/login",
            Self::LoginSuccess(_) => "auth/login_success",
            Self::LoginFailure(_) => "auth/login_failure",
            Self::Register(_) => "auth/register",
            Self::RegisterSuccess(_) => "auth/register_success",
            Self::RegisterFailure(_) => "auth/register_failure",
            Self::Logout => "auth/logout",
            Self::LogoutSuccess => "auth/logout_success",
            Self::LogoutFailure(_) => "auth/logout_failure",
            Self::CheckAuth => "auth/check",
            Self::TokenExpired => "auth/token_expired",
            Self::ClearError => "auth/clear_error",
        }
    }
}

pub fn reduce_auth(state: &AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::Login { .. } | AuthAction::Register(_) => AuthState {
            loading: true,
            error: None,
            ..state.clone()
        },
        AuthAction::Logout | AuthAction::CheckAuth => AuthState {
            loading: true,
            ..state.clone()
        },
        AuthAction::LoginSuccess(user) | AuthAction::RegisterSuccess(user) => AuthState {
            user: Some(user.clone()),
            is_authenticated: true,
            loading: false,
            error: None,
        },
        AuthAction::LoginFailure(error) | AuthAction::RegisterFailure(error) => AuthState {
            user: None,
            is_authenticated: false,
            loading: false,
            error: Some(error.clone()),
        },
        AuthAction::LogoutSuccess => AuthState::default(),
        AuthAction::LogoutFailure(error) => AuthState {
            loading: false,
            error: Some(error.clone()),
            ..state.clone()
        },
        AuthAction::TokenExpired => AuthState {
            user: None,
            is_authenticated: false,
            loading: false,
            error: Some(SESSION_EXPIRED_MESSAGE.to_string()),
        },
        AuthAction::ClearError => AuthState {
            error: None,
            ..state.clone()
        },
    }
}
