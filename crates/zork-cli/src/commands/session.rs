use anyhow::Result;
use zork_core::{Policy, UserProfile};

use super::Context;
use crate::utils::format_zorks;

pub async fn login(ctx: &Context) -> Result<()> {
    let token = rpassword::prompt_password("Access token: ")?;
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Access token required");
    }

    let profile = sign_in(ctx, token).await?;
    println!("Signed in as {} <{}>", profile.display_name(), profile.email);
    Ok(())
}

/// Store `token` and check it against the API. A rejected token is not kept.
pub async fn sign_in(ctx: &Context, token: &str) -> Result<UserProfile> {
    // A new token invalidates whatever profile was cached for the old one
    let (bootstrap, _) = ctx.bootstrap(Policy::none());
    bootstrap.reload_user()?;
    ctx.store.set_credential(token)?;

    let evaluation = ctx.evaluate(Policy::redirect_if_found(&ctx.config.home_path)).await?;
    match evaluation.snapshot.profile {
        Some(profile) if evaluation.navigated_to.is_some() => Ok(profile),
        _ => {
            ctx.store.clear_credential()?;
            anyhow::bail!("The API rejected this access token, it was not saved")
        }
    }
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let (_, profile) = ctx.require_user().await?;
    println!("{} <{}>", profile.display_name(), profile.email);
    println!("Balance: {}", format_zorks(profile.zorks));
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let (bootstrap, _) = ctx.bootstrap(Policy::none());
    bootstrap.logout()?;
    println!("Signed out");
    Ok(())
}
