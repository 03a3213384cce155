use crate::render::{HistoryView, ResultView};

/// Visibility of the camera feed and its buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraControls {
    pub feed: bool,
    pub capture_button: bool,
    pub stop_button: bool,
}

impl CameraControls {
    pub fn any_visible(&self) -> bool {
        self.feed || self.capture_button || self.stop_button
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Rendered(ResultView),
    Failed(String),
}

/// State of the dashboard surface. Every panel starts hidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    raw_preview: Option<String>,
    raw_preview_visible: bool,
    result: Option<ResultPanel>,
    result_visible: bool,
    history: Option<HistoryView>,
    camera: CameraControls,
    drop_zone_over: bool,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_preview(&self) -> Option<&str> {
        self.raw_preview.as_deref()
    }

    pub fn is_raw_preview_visible(&self) -> bool {
        self.raw_preview_visible
    }

    /// The raw preview's data URL if it holds data and is on screen.
    pub fn visible_raw_preview(&self) -> Option<&str> {
        if self.raw_preview_visible {
            self.raw_preview.as_deref().filter(|src| !src.is_empty())
        } else {
            None
        }
    }

    pub fn result(&self) -> Option<&ResultPanel> {
        self.result.as_ref()
    }

    pub fn is_result_visible(&self) -> bool {
        self.result_visible
    }

    pub fn history(&self) -> Option<&HistoryView> {
        self.history.as_ref()
    }

    pub fn camera_controls(&self) -> CameraControls {
        self.camera
    }

    pub fn is_drop_zone_over(&self) -> bool {
        self.drop_zone_over
    }

    pub fn show_raw_preview(&mut self, data_url: String) {
        self.raw_preview = Some(data_url);
        self.raw_preview_visible = true;
    }

    pub fn hide_raw_preview(&mut self) {
        self.raw_preview_visible = false;
    }

    pub fn hide_result(&mut self) {
        self.result_visible = false;
    }

    /// Replaces the result panel and reveals it. A view carrying the
    /// original image hides the standalone preview so only one copy shows.
    pub fn show_result(&mut self, view: ResultView) {
        if view.original.is_some() {
            self.raw_preview_visible = false;
        }
        self.result = Some(ResultPanel::Rendered(view));
        self.result_visible = true;
    }

    pub fn show_result_error(&mut self, message: impl Into<String>) {
        self.result = Some(ResultPanel::Failed(message.into()));
        self.result_visible = true;
    }

    pub fn render_history(&mut self, view: HistoryView) {
        self.history = Some(view);
    }

    pub fn show_camera_controls(&mut self) {
        self.camera = CameraControls {
            feed: true,
            capture_button: true,
            stop_button: true,
        };
    }

    pub fn hide_camera_controls(&mut self) {
        self.camera = CameraControls::default();
    }

    pub fn set_drop_zone_over(&mut self, over: bool) {
        self.drop_zone_over = over;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DetectionList;
    use pretty_assertions::assert_eq;

    fn view(original: Option<&str>) -> ResultView {
        ResultView {
            original: original.map(str::to_string),
            annotated: None,
            detections: DetectionList::NoneDetected,
        }
    }

    #[test]
    fn test_panels_start_hidden() {
        let page = Page::new();
        assert!(!page.is_raw_preview_visible());
        assert!(!page.is_result_visible());
        assert!(!page.camera_controls().any_visible());
        assert_eq!(page.history(), None);
    }

    #[test]
    fn test_hidden_preview_is_not_visible_data() {
        let mut page = Page::new();
        page.show_raw_preview("data:image/png;base64,AA".to_string());
        assert_eq!(page.visible_raw_preview(), Some("data:image/png;base64,AA"));

        page.hide_raw_preview();
        assert_eq!(page.visible_raw_preview(), None);
        assert_eq!(page.raw_preview(), Some("data:image/png;base64,AA"));
    }

    #[test]
    fn test_result_with_original_hides_preview() {
        let mut page = Page::new();
        page.show_raw_preview("data:x".to_string());

        page.show_result(view(Some("data:x")));
        assert!(page.is_result_visible());
        assert!(!page.is_raw_preview_visible());
    }

    #[test]
    fn test_result_without_original_keeps_preview() {
        let mut page = Page::new();
        page.show_raw_preview("data:x".to_string());

        page.show_result(view(None));
        assert!(page.is_raw_preview_visible());
    }
}
