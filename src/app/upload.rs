use super::ClinicApp;
use crate::{
    Result,
    api::{ImageFile, PredictionResult},
};
use tracing::debug;

impl ClinicApp {
    /// File-input entry point. Only the first file is used; `None` when
    /// there was nothing to upload.
    pub async fn handle_file_upload(
        &mut self,
        files: Vec<ImageFile>,
    ) -> Option<Result<PredictionResult>> {
        let file = files.into_iter().next()?;
        Some(self.process_file(file).await)
    }

    /// Shows `file` as the raw preview and submits it for prediction.
    /// The page is updated and the camera released before the request goes out.
    pub async fn process_file(&mut self, file: ImageFile) -> Result<PredictionResult> {
        debug!("Processing upload {}", file.name);

        self.page.show_raw_preview(file.to_data_url());
        self.page.hide_result();
        self.stop_camera();

        let outcome = self.submit_prediction(file).await;
        self.apply_prediction(outcome).await
    }

    pub fn drag_over(&mut self) {
        self.page.set_drop_zone_over(true);
    }

    /// Drag-leave and drag-end.
    pub fn drag_leave(&mut self) {
        self.page.set_drop_zone_over(false);
    }

    pub async fn drop_files(&mut self, files: Vec<ImageFile>) -> Option<Result<PredictionResult>> {
        self.page.set_drop_zone_over(false);

        if files.is_empty() {
            debug!("Drop without files ignored");
            return None;
        }
        self.handle_file_upload(files).await
    }
}
