use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use clinicdesk::api::appointment::Requester;
use clinicdesk::display::{self, DisplayStyle};
use clinicdesk::pages::appointments::AppointmentsPage;

use super::{CommonArgs, RunCommand};

/// List appointments. With a filter the backend searches the appointments of
/// the logged-in user, otherwise one patient's list is shown.
#[derive(Args)]
pub struct AppointmentsArgs {
    /// Patient whose appointments to list, defaults to the logged-in patient.
    #[arg(long)]
    pub patient_id: Option<u64>,

    /// Dashboard asking for the list.
    #[arg(long, default_value = "patient")]
    pub requester: Requester,

    /// Only "past" or "future" appointments.
    #[arg(long)]
    pub condition: Option<String>,

    /// Only appointments with this doctor or patient name.
    #[arg(long)]
    pub name: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,

    /// Do not print the table or csv header.
    #[arg(long)]
    pub headless: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for AppointmentsArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let session = ctx.require_token()?;
        let token = session.token().unwrap_or_default().to_string();
        let page = AppointmentsPage::new(ctx.api.clone(), session);

        if self.condition.is_some() || self.name.is_some() {
            page.filter(
                self.condition.as_deref().unwrap_or_default(),
                self.name.as_deref().unwrap_or_default(),
            )
            .await;
        } else {
            let patient_id = match self.patient_id {
                Some(id) => id,
                None => match ctx.api.get_patient_data(&token).await {
                    Some(patient) => match patient.id {
                        Some(id) => id,
                        None => bail!("patient profile has no id, please use `--patient-id`"),
                    },
                    None => bail!("unable to fetch patient data, please use `--patient-id`"),
                },
            };
            page.load(patient_id, self.requester).await;
        }

        display::display_state(page.state(), self.output, self.headless)
    }
}
