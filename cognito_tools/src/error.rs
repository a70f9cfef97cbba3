use thiserror::Error;

#[derive(Debug, Error)]
pub enum CognitoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the identity provider: {0}")]
    RequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Could not sign request: {0}")]
    SigningError(String),
    /// The provider rejected the supplied credentials or token.
    #[error("Not authorized: {message}")]
    NotAuthorized { message: String },
    /// Any other modelled service fault, e.g. `UsernameExistsException`.
    #[error("{message}")]
    ServiceError { kind: String, message: String },
}
