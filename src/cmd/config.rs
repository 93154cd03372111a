use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use clinicdesk::config::ClientConfig;
use clinicdesk::display;

use super::{CommonArgs, RunCommand};

/// Display the configuration used in JSON format.
#[derive(Args)]
pub struct ShowConfigArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for ShowConfigArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.common.load_config()?;
        display::pretty_json(cfg)
    }
}
