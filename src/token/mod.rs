pub mod auth_result;
pub mod error;
pub mod token;

pub use auth_result::AuthenticationResult;
pub use error::AuthError;
pub use token::Token;
