pub mod parser;

pub use parser::{parse_token_response, ExpirationSource};
