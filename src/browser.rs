use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    config::Config,
    error::FetchError,
    session::BrowsingSession,
    ui::{UIState, UserAction, UI},
};

pub struct Browser {
    session: BrowsingSession,
    ui: UI,
    current_state: UIState,
}

impl Browser {
    pub fn new(config: &Config) -> Result<Self> {
        let session = BrowsingSession::new(config).context("failed to build HTTP client")?;
        Ok(Self {
            session,
            ui: UI::new()?,
            current_state: UIState::Empty,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let result = self.main_loop().await;
        self.ui.cleanup()?;
        result
    }

    async fn main_loop(&mut self) -> Result<()> {
        self.ui.render(&self.current_state)?;
        self.show_new_painting().await?;

        loop {
            match self.ui.get_user_input(&self.current_state)? {
                UserAction::Quit => break,
                UserAction::PreviousPainting => self.show_previous_painting()?,
                UserAction::NewPainting => self.show_new_painting().await?,
                UserAction::SaveImage => self.save_image().await?,
                UserAction::DismissError => self.dismiss_error()?,
            }
        }

        info!(viewed = self.session.len(), "session finished");
        Ok(())
    }

    async fn show_new_painting(&mut self) -> Result<()> {
        let prior = self.current_state.clone();
        let ui = &mut self.ui;

        let outcome = self
            .session
            .step_forward_with(|attempt| {
                if let Err(e) =
                    ui.render_progress(attempt.number, attempt.max, attempt.source)
                {
                    warn!(error = %e, "failed to draw loading screen");
                }
            })
            .await
            .map(|_| ());

        match outcome {
            Ok(()) => self.show_current(None),
            Err(e) => self.restore_after_failure(prior, e),
        }
    }

    fn show_previous_painting(&mut self) -> Result<()> {
        if self.session.step_back().is_some() {
            self.show_current(None)?;
        }
        Ok(())
    }

    async fn save_image(&mut self) -> Result<()> {
        if self.session.is_empty() {
            return Ok(());
        }
        self.show_current(Some("Saving...".to_string()))?;

        let status = match self.session.save_current().await {
            Ok(Some(path)) => format!("Saved to {}", path.display()),
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(error = %e, "failed to save image");
                format!("Save failed: {}", e)
            }
        };
        self.show_current(Some(status))
    }

    fn dismiss_error(&mut self) -> Result<()> {
        if self.session.is_empty() {
            self.current_state = UIState::Empty;
            self.ui.render(&self.current_state)
        } else {
            self.show_current(None)
        }
    }

    fn show_current(&mut self, status: Option<String>) -> Result<()> {
        let (Some(record), Some(position)) = (self.session.current(), self.session.position())
        else {
            self.current_state = UIState::Empty;
            return self.ui.render(&self.current_state);
        };

        self.current_state = UIState::Painting {
            record: record.clone(),
            position,
            total: self.session.len(),
            back_disabled: self.session.back_disabled(),
            status,
        };
        self.ui.render(&self.current_state)
    }

    /// The failure is already logged by the fetcher; put the screen back the
    /// way it was, noting what happened.
    fn restore_after_failure(&mut self, prior: UIState, error: FetchError) -> Result<()> {
        self.current_state = match prior {
            UIState::Painting {
                record,
                position,
                total,
                back_disabled,
                ..
            } => UIState::Painting {
                record,
                position,
                total,
                back_disabled,
                status: Some(format!("Could not fetch a painting: {}", error)),
            },
            _ => UIState::Error {
                message: format!("Could not fetch a painting: {}", error),
            },
        };
        self.ui.render(&self.current_state)
    }
}
