use credit_manager::CreditManager;
use dbot_core::{CommandEvent, DbotError, Interaction, Result};
use image_handlers::{ImageJob, ImageJobQueue, SceneCatalog};
use llm_client::TextGenerator;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::command::{find_spec, usage_text, Command};

pub const INSUFFICIENT_CREDITS: &str = "Insufficient credits.";
pub const GENERIC_FAILURE: &str = "Error processing your request.";
pub const PERMISSION_DENIED: &str = "You do not have permission to use this command.";
pub const INVALID_AMOUNT: &str = "Credits must be a positive whole number.";
pub const EMPTY_ANSWER: &str = "I have nothing to say about that.";

/// User-facing text for an error. Internal detail never leaves the log.
pub fn error_reply(error: &DbotError) -> String {
    match error {
        DbotError::PermissionDenied => PERMISSION_DENIED.to_string(),
        DbotError::InvalidAmount(_) => INVALID_AMOUNT.to_string(),
        DbotError::Handler(dbot_core::HandlerError::InvalidOption { name, .. })
            if name == "credits" =>
        {
            INVALID_AMOUNT.to_string()
        }
        DbotError::Handler(_) => usage_text(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Routes command events to their handlers.
///
/// Every dispatched event receives exactly one response through its [`Interaction`]: either
/// directly here or, for image commands, from the job queue worker.
pub struct CommandRouter {
    credits: Arc<CreditManager>,
    text: Arc<dyn TextGenerator>,
    queue: Arc<ImageJobQueue>,
    scenes: Arc<SceneCatalog>,
    admin_user_id: String,
}

impl CommandRouter {
    pub fn new(
        credits: Arc<CreditManager>,
        text: Arc<dyn TextGenerator>,
        queue: Arc<ImageJobQueue>,
        scenes: Arc<SceneCatalog>,
        admin_user_id: impl Into<String>,
    ) -> Self {
        Self {
            credits,
            text,
            queue,
            scenes,
            admin_user_id: admin_user_id.into(),
        }
    }

    fn is_admin(&self, user_id: &str) -> bool {
        user_id == self.admin_user_id
    }

    /// Handles one event. Failures are logged and answered with a short notice.
    #[instrument(skip(self, event, interaction), fields(command = %event.command_name, user_id = %event.user_id))]
    pub async fn dispatch(&self, event: &CommandEvent, interaction: Interaction) {
        info!(options = ?event.options, "Received command");

        let admin_only = find_spec(&event.command_name).is_some_and(|spec| spec.admin_only);
        let outcome = if admin_only && !self.is_admin(&event.user_id) {
            Err(DbotError::PermissionDenied)
        } else {
            match Command::from_event(event) {
                Ok(command) => self.execute(command, event, &interaction).await,
                Err(e) => Err(DbotError::from(e)),
            }
        };

        if let Err(e) = outcome {
            match &e {
                DbotError::PermissionDenied | DbotError::InvalidAmount(_) | DbotError::Handler(_) => {
                    warn!(error = %e, "Command rejected")
                }
                _ => error!(error = %e, "Error handling command"),
            }
            if let Err(send_err) = interaction.respond(&error_reply(&e)).await {
                error!(error = %send_err, "Failed to deliver error reply");
            }
        }
    }

    async fn execute(
        &self,
        command: Command,
        event: &CommandEvent,
        interaction: &Interaction,
    ) -> Result<()> {
        let user_id = event.user_id.as_str();
        match command {
            Command::Imagine { prompt } => self.imagine(user_id, prompt, interaction).await,
            Command::Selfie => self.selfie(interaction).await,
            Command::Ask { prompt } => self.ask(user_id, &prompt, interaction).await,
            Command::CheckCredits { user } => {
                self.check_credits(user_id, user.as_deref(), interaction)
                    .await
            }
            Command::AddCredits { user, credits } => {
                self.add_credits(user_id, &user, credits, interaction).await
            }
        }
    }

    async fn imagine(&self, user_id: &str, prompt: String, interaction: &Interaction) -> Result<()> {
        interaction.defer().await?;
        if !self.credits.deduct_render(user_id).await? {
            info!(user_id = %user_id, "Render refused: insufficient credits");
            interaction.respond(INSUFFICIENT_CREDITS).await?;
            return Ok(());
        }
        if let Err(e) = self.queue.enqueue(ImageJob::new(prompt, interaction.clone())) {
            let cost = self.credits.config().render_cost;
            warn!(user_id = %user_id, cost, "Queue closed after charging; refunding render");
            if cost > 0 {
                if let Err(refund_err) = self.credits.add(user_id, cost).await {
                    error!(user_id = %user_id, cost, error = %refund_err, "Render refund failed");
                }
            }
            return Err(e.into());
        }
        info!(user_id = %user_id, pending = self.queue.pending(), "Render job enqueued");
        Ok(())
    }

    async fn selfie(&self, interaction: &Interaction) -> Result<()> {
        interaction.defer().await?;
        let prompt = self.scenes.random_prompt().to_string();
        self.queue.enqueue(ImageJob::new(prompt, interaction.clone()))?;
        Ok(())
    }

    async fn ask(&self, user_id: &str, prompt: &str, interaction: &Interaction) -> Result<()> {
        interaction.defer().await?;
        if !self.credits.deduct_ask(user_id).await? {
            interaction.respond(INSUFFICIENT_CREDITS).await?;
            return Ok(());
        }
        let answer = self.text.generate_text(prompt).await?;
        let answer = answer.trim();
        let reply = if answer.is_empty() { EMPTY_ANSWER } else { answer };
        interaction.respond(reply).await?;
        Ok(())
    }

    async fn check_credits(
        &self,
        user_id: &str,
        target: Option<&str>,
        interaction: &Interaction,
    ) -> Result<()> {
        let reply = match target {
            Some(other) if other != user_id => {
                if !self.is_admin(user_id) {
                    return Err(DbotError::PermissionDenied);
                }
                let balance = self.credits.fetch_balance(other).await?;
                format!("User {} has {} credits.", other, balance.credits)
            }
            _ => {
                let balance = self.credits.fetch_balance(user_id).await?;
                format!("You have {} credits.", balance.credits)
            }
        };
        interaction.respond(&reply).await?;
        Ok(())
    }

    async fn add_credits(
        &self,
        user_id: &str,
        target: &str,
        credits: i64,
        interaction: &Interaction,
    ) -> Result<()> {
        if !self.is_admin(user_id) {
            return Err(DbotError::PermissionDenied);
        }
        info!(target_user = %target, credits, "Adding credits");
        let updated = self.credits.add(target, credits).await?;
        interaction
            .respond(&format!(
                "Added {} credits to {}. New balance: {}.",
                credits, target, updated.credits
            ))
            .await?;
        Ok(())
    }
}
