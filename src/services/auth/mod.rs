pub mod audit;
pub mod factory;
pub mod jwt;
pub mod validator;

pub use audit::{AuthAudit, TracingAudit};
pub use factory::build_token_validator;
pub use jwt::JwtValidator;
pub use validator::{Claims, TokenValidator, UserId, ValidatorError};
