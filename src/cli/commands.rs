//! Subcommand handlers: form submissions and config actions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::args::{Args, Command, ConfigAction};
use super::enums::OutputFormat;
use crate::api::{ApiError, GenClient};
use crate::config::{default_path, Config, ConfigError};
use crate::context::SessionContext;
use crate::forms::{FormServices, SubmitOutcome};
use crate::media::{MediaError, MediaFile};
use crate::navigation::TerminalNavigator;
use crate::notify::TerminalNotifier;
use crate::selection::SelectionError;
use crate::tabs::{ActiveForm, Tab, TabContainer};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Failed to render output: {0}")]
    Output(String),
    #[error("Submission did not complete: {0}")]
    NotGenerated(String),
}

/// Run the parsed command line.
pub async fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.clone();
    match args.command {
        Command::Config { action } => handle_config_action(action, config_path.as_deref()),
        Command::TextToImage { description, image } => {
            let submission = Submission::TextToImage { description, image };
            run_submission(config_path.as_deref(), submission, args.output).await
        }
        Command::ImageToVideo { image, video } => {
            let submission = Submission::ImageToVideo { image, video };
            run_submission(config_path.as_deref(), submission, args.output).await
        }
        Command::VideoHandling { video } => {
            let submission = Submission::VideoHandling { video };
            run_submission(config_path.as_deref(), submission, args.output).await
        }
    }
}

/// Handle config subcommand actions.
fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            println!("Current configuration:");
            println!("  Base URL: {}", config.api.base_url);
            println!("  Timeout: {}s", config.api.timeout_secs);
            println!("  Connect timeout: {}s", config.api.connect_timeout_secs);
            println!(
                "  Session: {}",
                if config.session_token().is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            println!();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            Config::init(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

/// Form input gathered from the command line.
#[derive(Debug)]
enum Submission {
    TextToImage {
        description: String,
        image: Option<PathBuf>,
    },
    ImageToVideo {
        image: PathBuf,
        video: PathBuf,
    },
    VideoHandling {
        video: PathBuf,
    },
}

impl Submission {
    fn tab(&self) -> Tab {
        match self {
            Submission::TextToImage { .. } => Tab::TextToImage,
            Submission::ImageToVideo { .. } => Tab::ImageToVideo,
            Submission::VideoHandling { .. } => Tab::VideoHandling,
        }
    }

    /// Fill the mounted form the way a user would, then submit it.
    async fn submit(self, form: &ActiveForm) -> Result<SubmitOutcome, CliError> {
        match (self, form) {
            (Submission::TextToImage { description, image }, ActiveForm::TextToImage(form)) => {
                form.set_description(description);
                if let Some(path) = image {
                    form.select_image(MediaFile::from_path(&path)?)?;
                }
                Ok(form.submit().await)
            }
            (Submission::ImageToVideo { image, video }, ActiveForm::ImageToVideo(form)) => {
                form.select_image(MediaFile::from_path(&image)?)?;
                form.select_video(MediaFile::from_path(&video)?)?;
                Ok(form.submit().await)
            }
            (Submission::VideoHandling { video }, ActiveForm::VideoHandling(form)) => {
                form.select_video(MediaFile::from_path(&video)?)?;
                Ok(form.submit().await)
            }
            (submission, form) => Err(CliError::NotGenerated(format!(
                "{:?} cannot be submitted on the {} tab",
                submission,
                form.tab()
            ))),
        }
    }
}

async fn run_submission(
    config_path: Option<&Path>,
    submission: Submission,
    output: OutputFormat,
) -> Result<(), CliError> {
    let config = Config::load(config_path)?;
    let client = GenClient::from_config(&config.api, config.session_token())?;

    let context = Arc::new(SessionContext::new(client.clone()));
    context.load_user().await?;

    let services = FormServices::new(
        context,
        Arc::new(TerminalNotifier),
        Arc::new(TerminalNavigator::new(config.api.base_url.clone())),
        client,
    );
    let mut tabs = TabContainer::new(services);
    tabs.click(submission.tab());

    let outcome = submission.submit(tabs.active_form()).await?;
    report(outcome, output)
}

fn report(outcome: SubmitOutcome, output: OutputFormat) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Generated(Some(cover)) => {
            let rendered = output
                .render(&cover)
                .map_err(|e| CliError::Output(e.to_string()))?;
            println!("{}", rendered);
            Ok(())
        }
        SubmitOutcome::Generated(None) => Ok(()),
        SubmitOutcome::Busy => Err(CliError::NotGenerated("already in flight".to_string())),
        SubmitOutcome::Invalid(e) => Err(CliError::NotGenerated(e.to_string())),
        SubmitOutcome::Redirected(route) => Err(CliError::NotGenerated(format!(
            "continue at {}",
            route
        ))),
        SubmitOutcome::Rejected { code, message } => Err(CliError::NotGenerated(format!(
            "code {}: {}",
            code, message
        ))),
        SubmitOutcome::Failed => Err(CliError::NotGenerated("request failed".to_string())),
    }
}
