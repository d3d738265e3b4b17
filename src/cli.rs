use crate::api::ApiClient;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// A terminal client for creating, answering, and reviewing surveys
#[derive(Parser, Debug)]
#[command(name = "canvass", version, about = "A terminal client for creating, answering, and reviewing surveys", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    /// Override the survey service URL from the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Override the UI theme (dark, light, no-color)
    #[arg(long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the survey list without entering the TUI
    List {
        /// Show question counts as well
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Cli {
    /// Run the requested subcommand, if any.
    ///
    /// Returns `true` when a subcommand ran and the process should exit
    /// without starting the TUI.
    pub fn execute(&self, config: &Config) -> Result<bool> {
        match &self.command {
            Some(Commands::List { verbose }) => {
                Self::cmd_list(config, *verbose)?;
                Ok(true)
            }
            Some(Commands::Completions { shell }) => {
                Self::cmd_completions(*shell);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Merge CLI overrides into the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }

    fn cmd_list(config: &Config, verbose: bool) -> Result<()> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let api = ApiClient::new(&config.api_url).context("Failed to create API client")?;

        let surveys = runtime
            .block_on(api.get_surveys())
            .context("Failed to fetch surveys")?;

        if surveys.is_empty() {
            println!("No surveys available.");
            return Ok(());
        }

        println!("Surveys ({}):", surveys.len());
        for survey in &surveys {
            if verbose {
                println!(
                    "  #{} {} — {} questions, {} replies",
                    survey.id,
                    survey.title,
                    survey.questions.len(),
                    survey.respondents
                );
            } else {
                println!("  {}", survey.title);
            }
        }

        Ok(())
    }

    fn cmd_completions(shell: Shell) {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    }
}
