use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use clinicdesk::display;
use clinicdesk::session::Role;
use serde::Serialize;

use super::{CommonArgs, RunCommand};

/// Display the stored session in JSON format. The token itself is never
/// printed.
#[derive(Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct SessionInfo<'a> {
    server: &'a str,
    path: &'a str,
    role: Option<Role>,
    logged_in: bool,
}

#[async_trait]
impl RunCommand for SessionArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let session = ctx.session()?;

        display::pretty_json(SessionInfo {
            server: &ctx.cfg.api_url,
            path: ctx.store.path(),
            role: session.role(),
            logged_in: session.token().is_some(),
        })
    }
}
