//! The clinic client: login, dashboard history, uploads and camera capture,
//! wired to injected storage, HTTP, device and shell collaborators.

mod camera;
mod page;
mod shell;
mod upload;

pub use page::{CameraControls, Page, ResultPanel};
pub use shell::{Route, Shell, TerminalShell};

use crate::{
    Error, Result,
    api::{ApiClient, HistoryEntry, ImageFile, PredictionResult},
    camera::{CameraSession, CaptureDevice},
    render::{self, HistoryView},
    session::TokenStore,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const REGISTERED_MESSAGE: &str = "Registered successfully! Please login.";

pub struct ClinicApp {
    api: Arc<dyn ApiClient>,
    session: Arc<dyn TokenStore>,
    shell: Arc<dyn Shell>,
    camera_device: Option<Arc<dyn CaptureDevice>>,
    camera: Option<CameraSession>,
    page: Page,
    date_format: String,
}

impl ClinicApp {
    pub fn new(
        api: Arc<dyn ApiClient>,
        session: Arc<dyn TokenStore>,
        shell: Arc<dyn Shell>,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            api,
            session,
            shell,
            camera_device: None,
            camera: None,
            page: Page::new(),
            date_format: date_format.into(),
        }
    }

    pub fn with_camera_device(mut self, device: Arc<dyn CaptureDevice>) -> Self {
        self.camera_device = Some(device);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Posts the credentials; on success stores the token and opens the dashboard.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let outcome = async {
            let token = self.api.login(username, password).await?;
            self.session.set_token(&token.access_token).await
        }
        .await;

        match outcome {
            Ok(()) => {
                info!("Logged in as {}", username);
                self.shell.navigate(Route::Dashboard);
                Ok(())
            }
            Err(e) => {
                self.shell.alert(&e.to_string());
                Err(e)
            }
        }
    }

    /// Creates the account. Does not log in.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<()> {
        match self.api.register(username, password).await {
            Ok(()) => {
                info!("Registered {}", username);
                self.shell.alert(REGISTERED_MESSAGE);
                Ok(())
            }
            Err(e) => {
                self.shell.alert(&e.to_string());
                Err(e)
            }
        }
    }

    /// Dashboard entry: fetches history and renders it into the history panel.
    ///
    /// Without a stored token the user goes back to the login view and no
    /// request is made. A rejected token is cleared and sends the user to the login view
    /// silently; any other failure shows inline error text instead of the list.
    pub async fn load_history(&mut self) -> Result<Vec<HistoryEntry>> {
        let Some(token) = self.current_token().await? else {
            self.shell.navigate(Route::Login);
            return Err(Error::NotAuthenticated);
        };

        match self.api.history(&token).await {
            Ok(entries) => {
                self.page
                    .render_history(render::history_view(&entries, &self.date_format));
                Ok(entries)
            }
            Err(Error::SessionExpired) => {
                info!("Session rejected, returning to login");
                self.session.clear_token().await?;
                self.shell.navigate(Route::Login);
                Err(Error::SessionExpired)
            }
            Err(e) => {
                warn!("History error: {}", e);
                self.page.render_history(HistoryView::error(&e));
                Err(e)
            }
        }
    }

    /// Submits `image`, renders the outcome and, on success, refreshes history.
    pub async fn predict_image(&mut self, image: ImageFile) -> Result<PredictionResult> {
        let outcome = self.submit_prediction(image).await;
        self.apply_prediction(outcome).await
    }

    async fn submit_prediction(&self, image: ImageFile) -> Result<PredictionResult> {
        let Some(token) = self.current_token().await? else {
            return Err(Error::NotAuthenticated);
        };
        self.api.predict(&token, image).await
    }

    async fn apply_prediction(
        &mut self,
        outcome: Result<PredictionResult>,
    ) -> Result<PredictionResult> {
        match outcome {
            Ok(result) => {
                self.display_result(&result);
                // The refresh renders its own failure state.
                if let Err(e) = self.load_history().await {
                    debug!("History refresh after prediction failed: {}", e);
                }
                Ok(result)
            }
            Err(Error::NotAuthenticated) => {
                self.shell.navigate(Route::Login);
                Err(Error::NotAuthenticated)
            }
            Err(e) => {
                warn!("Prediction error: {}", e);
                self.page.show_result_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Rebuilds and reveals the result panel.
    pub fn display_result(&mut self, result: &PredictionResult) {
        let view = render::result_view(result, self.page.visible_raw_preview());
        self.page.show_result(view);
    }

    async fn current_token(&self) -> Result<Option<String>> {
        Ok(self
            .session
            .get_token()
            .await?
            .filter(|token| !token.is_empty()))
    }
}
