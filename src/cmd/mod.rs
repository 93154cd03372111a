mod account;
mod appointments;
mod config;
mod doctors;
mod patient;
mod session;

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use clinicdesk::client::service::ClinicApi;
use clinicdesk::client::RestfulClientBuilder;
use clinicdesk::config::{ClientConfig, ConfigArgs};
use clinicdesk::logs;
use clinicdesk::pages::{Navigation, Page};
use clinicdesk::session::{Session, SessionStore};
use clinicdesk::ui::TerminalUi;
use log::{debug, info, warn};

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Override the log level of the config file.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Everything a command needs to drive the pages.
pub struct Context {
    pub cfg: ClientConfig,
    pub api: Arc<dyn ClinicApi>,
    pub store: SessionStore,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<ClientConfig> {
        let (cfg, from_file): (ClientConfig, _) = self.config.load("client")?;
        let level = self.log_level.as_deref().unwrap_or(&cfg.log_level);
        logs::init(level)?;
        if !from_file {
            warn!("Config file for client not found, using defaults");
        }
        debug!("Use config: {cfg:?}");
        Ok(cfg)
    }

    pub fn build_context(&self) -> Result<Context> {
        let cfg = self.load_config()?;
        let client = RestfulClientBuilder::new(&cfg.api_url)
            .accept_invalid_certs(cfg.accept_invalid_certs)
            .build()?;
        let store = SessionStore::new(&cfg.session_path);
        Ok(Context {
            cfg,
            api: Arc::new(client),
            store,
        })
    }
}

impl Context {
    pub fn session(&self) -> Result<Session> {
        self.store.load()
    }

    /// Token of the stored session, commands that need one fail early.
    pub fn require_token(&self) -> Result<Session> {
        let session = self.session()?;
        if session.token().is_none() {
            bail!("no session token, please run `clinicdesk login` first");
        }
        Ok(session)
    }
}

/// Navigation has no screen to switch to in a terminal, it only tells the user
/// where the flow ended.
pub fn follow(nav: Navigation) {
    match nav {
        Navigation::Stay => {}
        Navigation::Redirect(Page::Home) => {
            info!("Back to the entry page, run `clinicdesk login` or `clinicdesk select-role`")
        }
        Navigation::Redirect(page) => info!("Continue on the {page}"),
    }
}

pub fn terminal_ui(assume_yes: bool) -> Arc<TerminalUi> {
    Arc::new(TerminalUi::new(assume_yes))
}

/// Takes the flag value or asks for it.
pub fn value_or_prompt(ui: &TerminalUi, value: &Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value.clone()),
        None => ui.prompt(label),
    }
}

pub fn secret_or_prompt(ui: &TerminalUi, value: &Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value.clone()),
        None => ui.prompt_secret(label),
    }
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Doctors(doctors::DoctorsArgs),
    AddDoctor(doctors::AddDoctorArgs),
    DeleteDoctor(doctors::DeleteDoctorArgs),
    Book(patient::BookArgs),
    Signup(patient::SignupArgs),
    Me(patient::MeArgs),
    Login(account::LoginArgs),
    SelectRole(account::SelectRoleArgs),
    Logout(account::LogoutArgs),
    Appointments(appointments::AppointmentsArgs),
    Session(session::SessionArgs),
    Config(config::ShowConfigArgs),
}

#[async_trait]
impl RunCommand for App {
    async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Doctors(args) => args.run().await,
            Commands::AddDoctor(args) => args.run().await,
            Commands::DeleteDoctor(args) => args.run().await,
            Commands::Book(args) => args.run().await,
            Commands::Signup(args) => args.run().await,
            Commands::Me(args) => args.run().await,
            Commands::Login(args) => args.run().await,
            Commands::SelectRole(args) => args.run().await,
            Commands::Logout(args) => args.run().await,
            Commands::Appointments(args) => args.run().await,
            Commands::Session(args) => args.run().await,
            Commands::Config(args) => args.run().await,
        }
    }
}
