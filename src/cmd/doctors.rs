use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use clinicdesk::api::doctor::NewDoctor;
use clinicdesk::display::{self, DisplayStyle};
use clinicdesk::pages::admin::AdminDashboard;
use clinicdesk::pages::board::DoctorBoard;

use super::{follow, secret_or_prompt, terminal_ui, value_or_prompt, CommonArgs, RunCommand};

/// List doctors, as seen by the role of the current session.
#[derive(Args)]
pub struct DoctorsArgs {
    /// Only doctors whose name matches.
    #[arg(long)]
    pub name: Option<String>,

    /// Only doctors available at this time, "AM" or "PM".
    #[arg(long)]
    pub time: Option<String>,

    /// Only doctors of this specialty.
    #[arg(long)]
    pub specialty: Option<String>,

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
impl RunCommand for DoctorsArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let board = DoctorBoard::new(ctx.api.clone(), terminal_ui(false), ctx.session()?);

        if self.name.is_some() || self.time.is_some() || self.specialty.is_some() {
            board
                .filter(
                    self.name.as_deref().unwrap_or_default(),
                    self.time.as_deref().unwrap_or_default(),
                    self.specialty.as_deref().unwrap_or_default(),
                )
                .await;
        } else {
            board.load().await;
        }

        display::display_state(board.state(), self.output, self.headless)
    }
}

/// Add a doctor (admin). Missing fields are asked for.
#[derive(Args)]
pub struct AddDoctorArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub specialty: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Login password of the doctor, asked without echo when omitted.
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub mobile: Option<String>,

    /// Available time slots, comma separated, e.g. "09:00-10:00,10:00-11:00".
    #[arg(long, value_delimiter = ',')]
    pub availability: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for AddDoctorArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let ui = terminal_ui(false);

        let availability = if self.availability.is_empty() {
            ui.prompt("Availability (comma separated)")?
                .split(',')
                .map(String::from)
                .collect()
        } else {
            self.availability.clone()
        };
        let form = NewDoctor {
            name: value_or_prompt(&ui, &self.name, "Name")?,
            specialty: value_or_prompt(&ui, &self.specialty, "Specialty")?,
            email: value_or_prompt(&ui, &self.email, "Email")?,
            password: secret_or_prompt(&ui, &self.password, "Password")?,
            mobile: value_or_prompt(&ui, &self.mobile, "Mobile")?,
            availability,
        };

        let page = AdminDashboard::new(ctx.api.clone(), ui, ctx.session()?);
        follow(page.add_doctor(form).await);
        Ok(())
    }
}

/// Delete a doctor (admin).
#[derive(Args)]
pub struct DeleteDoctorArgs {
    /// ID of the doctor to delete.
    pub id: u64,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for DeleteDoctorArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let page = AdminDashboard::new(ctx.api.clone(), terminal_ui(self.yes), ctx.session()?);

        page.board().load().await;
        follow(page.delete_doctor(self.id).await);
        Ok(())
    }
}
