use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, ValueEnum};
use clinicdesk::pages::login::LoginPage;
use clinicdesk::pages::patient::PatientDashboard;
use clinicdesk::session::{Role, Session};

use super::{follow, secret_or_prompt, terminal_ui, value_or_prompt, CommonArgs, RunCommand};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Account {
    Admin,
    Doctor,
    Patient,
}

/// Log in and store the session token.
#[derive(Args)]
pub struct LoginArgs {
    /// Kind of account to log in with.
    pub account: Account,

    /// Admin username.
    #[arg(long)]
    pub username: Option<String>,

    /// Doctor or patient email.
    #[arg(long)]
    pub email: Option<String>,

    /// Asked without echo when omitted.
    #[arg(long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let ui = terminal_ui(false);

        let nav = match self.account {
            Account::Admin => {
                let username = value_or_prompt(&ui, &self.username, "Username")?;
                let password = secret_or_prompt(&ui, &self.password, "Password")?;
                let page = LoginPage::new(ctx.api.clone(), ui, ctx.store);
                page.admin_login(&username, &password).await?
            }
            Account::Doctor => {
                let email = value_or_prompt(&ui, &self.email, "Email")?;
                let password = secret_or_prompt(&ui, &self.password, "Password")?;
                let page = LoginPage::new(ctx.api.clone(), ui, ctx.store);
                page.doctor_login(&email, &password).await?
            }
            Account::Patient => {
                let email = value_or_prompt(&ui, &self.email, "Email")?;
                let password = secret_or_prompt(&ui, &self.password, "Password")?;
                let session = Session::with_role(Role::Patient);
                let page = PatientDashboard::new(ctx.api.clone(), ui, session, ctx.store);
                page.login(&email, &password).await?
            }
        };
        follow(nav);
        Ok(())
    }
}

/// Browse as a role without logging in.
#[derive(Args)]
pub struct SelectRoleArgs {
    pub role: Role,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for SelectRoleArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let page = LoginPage::new(ctx.api.clone(), terminal_ui(false), ctx.store);
        follow(page.select_role(self.role)?);
        Ok(())
    }
}

/// Forget the stored session.
#[derive(Args)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[async_trait]
impl RunCommand for LogoutArgs {
    async fn run(&self) -> Result<()> {
        let ctx = self.common.build_context()?;
        let page = LoginPage::new(ctx.api.clone(), terminal_ui(false), ctx.store);
        follow(page.logout()?);
        Ok(())
    }
}
