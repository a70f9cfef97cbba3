use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use cognito_tools::CognitoApi;
use log::debug;

use crate::{
    auth::{AuthApi, IdentityManagement},
    config::ServerConfig,
    errors::ServerError,
    routes::{health, index, CalculateSpeedRoute, LoginRoute, RegisterRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let provider = CognitoApi::new(config.cognito.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<P>(config: ServerConfig, provider: P) -> Result<Server, ServerError>
where P: IdentityManagement + Clone + Send + 'static
{
    let auto_confirm = config.auto_confirm_users;
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(provider.clone(), auto_confirm);
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gsc::access_log"))
            .app_data(json_payload_config())
            .app_data(web::Data::new(auth_api));
        let auth_scope =
            web::scope("/auth").service(RegisterRoute::<P>::new()).service(LoginRoute::<P>::new());
        app.service(health).service(index).service(auth_scope).service(CalculateSpeedRoute::<P>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Bodies that cannot be parsed as JSON at all are rejected here, before any field validation runs.
pub(crate) fn json_payload_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejecting malformed JSON payload. {err}");
        ServerError::MalformedPayload.into()
    })
}
