use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use clinicdesk::api::patient::NewPatient;
use clinicdesk::display;
use clinicdesk::pages::patient::PatientDashboard;
use clinicdesk::session::Session;

use super::{follow, secret_or_prompt, terminal_ui, value_or_prompt, CommonArgs, RunCommand};

/// Book an appointment with a doctor (logged-in patient).
#[derive(Args)]
pub struct BookArgs {
    /// ID of the doctor.
    pub doctor_id: u64,

    /// Confirm the booking without asking.
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for BookArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let page = PatientDashboard::new(
            ctx.api.clone(),
            terminal_ui(self.yes),
            ctx.session()?,
            ctx.store,
        );

        page.board().load().await;
        follow(page.book(self.doctor_id).await);
        Ok(())
    }
}

/// Create a patient account. Missing fields are asked for.
#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Asked without echo when omitted.
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for SignupArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let ui = terminal_ui(false);

        let form = NewPatient {
            name: value_or_prompt(&ui, &self.name, "Name")?,
            email: value_or_prompt(&ui, &self.email, "Email")?,
            password: secret_or_prompt(&ui, &self.password, "Password")?,
            phone: value_or_prompt(&ui, &self.phone, "Phone")?,
            address: value_or_prompt(&ui, &self.address, "Address")?,
        };

        let session = ctx.session()?;
        let page = PatientDashboard::new(ctx.api.clone(), ui, session, ctx.store);
        follow(page.signup(form).await);
        Ok(())
    }
}

/// Display the profile of the logged-in patient in JSON format.
#[derive(Args)]
pub struct MeArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for MeArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let session: Session = ctx.require_token()?;
        let token = session.token().unwrap_or_default();

        match ctx.api.get_patient_data(token).await {
            Some(patient) => display::pretty_json(patient),
            None => bail!("unable to fetch patient data"),
        }
    }
}
