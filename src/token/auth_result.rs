use crate::token::{AuthError, Token};

/// Outcome of one token fetch: exactly one of a token or an error.
#[derive(Debug)]
pub enum AuthenticationResult {
    Authenticated(Token),
    Failure(AuthError),
}

impl AuthenticationResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationResult::Authenticated(_))
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            AuthenticationResult::Authenticated(token) => Some(token),
            AuthenticationResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            AuthenticationResult::Authenticated(_) => None,
            AuthenticationResult::Failure(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<Token, AuthError> {
        self.into()
    }
}

impl From<Result<Token, AuthError>> for AuthenticationResult {
    fn from(result: Result<Token, AuthError>) -> Self {
        match result {
            Ok(token) => AuthenticationResult::Authenticated(token),
            Err(e) => AuthenticationResult::Failure(e),
        }
    }
}

impl From<AuthenticationResult> for Result<Token, AuthError> {
    fn from(result: AuthenticationResult) -> Self {
        match result {
            AuthenticationResult::Authenticated(token) => Ok(token),
            AuthenticationResult::Failure(e) => Err(e),
        }
    }
}
