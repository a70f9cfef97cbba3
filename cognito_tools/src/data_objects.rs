use serde::{Deserialize, Serialize};

/// Response to a `SignUp` call. `user_sub` is the pool-unique id of the new user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpResponse {
    pub user_sub: String,
    #[serde(default)]
    pub user_confirmed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InitiateAuthResponse {
    pub authentication_result: Option<AuthenticationResult>,
    pub challenge_name: Option<String>,
}

/// The token bundle issued on a successful `InitiateAuth` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

/// The profile returned by `GetUser` for a valid access token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub user_attributes: Vec<UserAttribute>,
}

impl UserProfile {
    /// Looks up a single attribute by name, e.g. `email` or `sub`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.user_attributes.iter().find(|a| a.name == name).map(|a| a.value.as_str())
    }
}
