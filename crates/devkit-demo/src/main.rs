use std::process::ExitCode;

use devkit::captcha::CaptchaConfig;
use devkit::Dispatcher;
use devkit_demo::{commands, DemoContext, USER_CREATED};

fn main() -> ExitCode {
    devkit::init_logging();

    let captcha = match CaptchaConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let context = DemoContext::new(captcha);
    context.signals().connect(USER_CREATED, |signal, user| {
        tracing::info!(signal = %signal, id = user.id, email = %user.email, "welcome mail queued");
    });

    Dispatcher::new(context, commands()).run()
}
