//! Sign-in commands

use colored::Colorize;

use xeno_crm::{Identity, SignInService};

use super::Context;

pub async fn login(ctx: &mut Context<'_>, email: String, name: Option<String>) -> Result<(), String> {
    let service = SignInService::new(ctx.gateway());
    let session = service
        .sign_in(&Identity::new(email, name))
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{} Signed in as {} <{}> (customer {})",
        "✓".green(),
        session.name.bold(),
        session.email,
        session.customer_id
    );
    ctx.config.session = Some(session);
    ctx.config.save(ctx.profile)
}

pub fn logout(ctx: &mut Context<'_>) -> Result<(), String> {
    if ctx.config.session.take().is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.config.save(ctx.profile)?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(ctx: &Context<'_>) -> Result<(), String> {
    match ctx.session() {
        Some(session) => {
            ctx.format.print_value(
                session,
                format!("{} <{}> (customer {})", session.name, session.email, session.customer_id),
            );
            Ok(())
        }
        None => Err("Not signed in. Run `xeno login --email <email>`.".into()),
    }
}
