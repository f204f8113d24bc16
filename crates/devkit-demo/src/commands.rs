//! The demo command tree.

use anyhow::{anyhow, Context as _};
use chrono::DateTime;
use devkit::{
    bind_with_terminal, humanize_duration, humanize_relative, parse_args, ActionResult, Command,
    Envelope,
};

use crate::context::{DemoContext, USER_CREATED};
use crate::user::{User, VerifyForm};

pub fn commands() -> Vec<Command<DemoContext>> {
    vec![
        Command::new("version")
            .short("Print the version")
            .action(|_, _, _| version()),
        Command::new("uptime")
            .short("Format a number of seconds")
            .example("uptime 3661")
            .action(|_, args, _| uptime(args)),
        Command::new("when")
            .short("Describe a timestamp relative to now")
            .long("Takes an RFC 3339 timestamp such as 2024-03-15T09:30:00Z.")
            .example("when 2024-03-15T09:30:00Z")
            .action(when),
        Command::new("users")
            .short("Manage users")
            .subcommands([
                Command::new("list")
                    .short("List users")
                    .action(|_, _, ctx| list_users(ctx)),
                Command::new("create")
                    .short("Create a user")
                    .long("Missing fields are asked for on the terminal.")
                    .example("users create -name Ada -email ada@example.com -age 36")
                    .action(|_, args, ctx| create_user(args, ctx)),
            ]),
        Command::new("captcha")
            .short("CAPTCHA checks")
            .subcommand(
                Command::new("verify")
                    .short("Verify a CAPTCHA token")
                    .example("captcha verify -token XXXX -ip 203.0.113.7")
                    .action(|_, args, ctx| verify_captcha(args, ctx)),
            ),
    ]
}

fn version() -> ActionResult {
    Ok(Envelope::message(format!(
        "devkit-demo {}",
        env!("CARGO_PKG_VERSION")
    )))
}

fn uptime(args: &[String]) -> ActionResult {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("usage: uptime <seconds>"))?;
    let seconds: i32 = raw
        .parse()
        .with_context(|| format!("invalid number of seconds: {}", raw))?;
    Ok(Envelope::message(humanize_duration(seconds)))
}

fn when(_: &Command<DemoContext>, args: &[String], ctx: &DemoContext) -> ActionResult {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("usage: when <timestamp>"))?;
    let instant = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid timestamp: {}", raw))?;
    Ok(Envelope::message(humanize_relative(&instant, &ctx.now())))
}

fn list_users(ctx: &DemoContext) -> ActionResult {
    let items = ctx.users().iter().map(User::to_record).collect();
    Ok(Envelope::list("Users", items))
}

fn create_user(args: &[String], ctx: &DemoContext) -> ActionResult {
    let mut user = User::default();
    bind_with_terminal(&mut user, &parse_args(args), ctx.terminal())?;

    let user = ctx.insert_user(user);
    let report = ctx.signals().emit(USER_CREATED, &user);
    tracing::debug!(
        id = user.id,
        delivered = report.delivered,
        panicked = report.panicked,
        "user created"
    );

    Ok(Envelope::details("User created", user.to_record()))
}

fn verify_captcha(args: &[String], ctx: &DemoContext) -> ActionResult {
    let mut form = VerifyForm::default();
    bind_with_terminal(&mut form, &parse_args(args), ctx.terminal())?;

    let captcha = ctx.captcha().build()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(captcha.verify_with(ctx.turnstile(), &form.token, &form.ip))?;

    Ok(Envelope::message(format!(
        "{} verification succeeded",
        captcha.kind
    )))
}
