//! A worked example of a devkit-based CLI app.
//!
//! ```text
//! devkit-demo version
//! devkit-demo uptime 3661
//! devkit-demo when 2024-03-15T09:30:00Z
//! devkit-demo users list [--json]
//! devkit-demo users create [-name N] [-email E] [-age A]
//! devkit-demo captcha verify [-token T] [-ip I]
//! ```
//!
//! `captcha verify` reads its settings from `DEVKIT_CAPTCHA_*` environment
//! variables. Set `DEVKIT_CAPTCHA_KIND=Testing` to accept every token.

mod commands;
mod context;
mod user;

pub use commands::commands;
pub use context::{DemoContext, USER_CREATED};
pub use user::{User, VerifyForm};
