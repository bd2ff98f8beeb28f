use taskdeck_auth::{AuthApi, AuthGateway};

use crate::output;

pub async fn login<A: AuthApi>(
    gateway: &AuthGateway<A>,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match gateway.login(email, password).await {
        Ok(session) => output::output_success(session.user),
        Err(err) => output::output_error(&err.to_string()),
    }
    Ok(())
}

pub async fn signup<A: AuthApi>(
    gateway: &AuthGateway<A>,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match gateway.signup(name, email, password).await {
        Ok(session) => output::output_success(session.user),
        Err(err) => output::output_error(&err.to_string()),
    }
    Ok(())
}

pub fn logout<A: AuthApi>(gateway: &AuthGateway<A>) -> anyhow::Result<()> {
    match gateway.logout() {
        Ok(()) => output::output_success(serde_json::json!({ "logged_out": true })),
        Err(err) => output::output_error(&err.to_string()),
    }
    Ok(())
}

pub async fn whoami<A: AuthApi>(gateway: &AuthGateway<A>) -> anyhow::Result<()> {
    match gateway.restore().await {
        Ok(Some(session)) => output::output_success(session.user),
        Ok(None) => output::output_error("Not signed in. Run `taskdeck login` first."),
        Err(err) => output::output_error(&err.to_string()),
    }
    Ok(())
}
