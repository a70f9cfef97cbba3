//! A minimal client for the AWS Cognito Identity Provider API.
//!
//! Only the handful of operations the speed calculator service needs are implemented: user sign-up,
//! admin confirmation, password authentication, and access-token verification via `GetUser`. The client speaks
//! the AWS JSON 1.1 wire protocol directly; the admin operation is SigV4-signed with IAM credentials, everything
//! else uses the unauthenticated client API.

mod api;
mod config;
mod error;
mod sigv4;

mod data_objects;

pub mod helpers;

pub use api::CognitoApi;
pub use config::CognitoConfig;
pub use data_objects::{AuthenticationResult, SignUpResponse, UserAttribute, UserProfile};
pub use error::CognitoApiError;
