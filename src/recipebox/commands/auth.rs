use crate::auth::AuthGate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::StorageBackend;

pub async fn login<B: StorageBackend>(
    gate: &mut AuthGate<B>,
    email: &str,
    password: &str,
) -> Result<CmdResult> {
    let user = gate.login(email, password).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Signed in as {}.", user.email)));
    Ok(result.with_user(user))
}

pub async fn signup<B: StorageBackend>(
    gate: &mut AuthGate<B>,
    email: &str,
    password: &str,
    username: &str,
) -> Result<CmdResult> {
    let user = gate.signup(email, password, username).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Account created. Welcome, {}!",
        user.username.as_deref().unwrap_or(&user.email)
    )));
    Ok(result.with_user(user))
}

pub fn logout<B: StorageBackend>(gate: &mut AuthGate<B>) -> Result<CmdResult> {
    let was_signed_in = gate.is_authenticated();
    gate.logout()?;
    let mut result = CmdResult::default();
    if was_signed_in {
        result.add_message(CmdMessage::success("Signed out."));
    } else {
        result.add_message(CmdMessage::info("Not signed in."));
    }
    Ok(result)
}

pub fn whoami<B: StorageBackend>(gate: &AuthGate<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match gate.user() {
        Some(user) => result = result.with_user(user.clone()),
        None => result.add_message(CmdMessage::info("Not signed in.")),
    }
    Ok(result)
}
