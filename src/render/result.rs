use crate::api::{Detection, PredictionResult};
use std::fmt;

pub const RESULT_HEADING: &str = "Analysis Result:";
pub const ORIGINAL_HEADING: &str = "Original";
pub const ANNOTATED_HEADING: &str = "AI Analysis";
pub const DETECTIONS_HEADING: &str = "Detected Affections:";
pub const NO_AFFECTIONS: &str = "No affections detected.";

/// Everything the result panel shows for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// Copy of the raw preview's data URL, when it was on screen.
    pub original: Option<String>,
    /// `data:image/jpeg;base64,...` of the server's annotated image.
    pub annotated: Option<String>,
    pub detections: DetectionList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetectionList {
    NoneDetected,
    Items(Vec<String>),
}

impl DetectionList {
    pub fn items(&self) -> &[String] {
        match self {
            Self::NoneDetected => &[],
            Self::Items(items) => items,
        }
    }
}

/// `lesion (87%)`
pub fn detection_label(detection: &Detection) -> String {
    format!(
        "{} ({:.0}%)",
        detection.class_name,
        (detection.confidence * 100.0).round()
    )
}

/// Builds the result panel model. `visible_preview` is the raw preview's
/// data URL, passed only when its container is currently shown.
pub fn result_view(result: &PredictionResult, visible_preview: Option<&str>) -> ResultView {
    let original = visible_preview
        .filter(|src| !src.is_empty())
        .map(str::to_string);

    let annotated = result
        .image_base64
        .as_deref()
        .filter(|b64| !b64.is_empty())
        .map(|b64| format!("data:image/jpeg;base64,{b64}"));

    let detections = if result.detections.is_empty() {
        DetectionList::NoneDetected
    } else {
        DetectionList::Items(result.detections.iter().map(detection_label).collect())
    };

    ResultView {
        original,
        annotated,
        detections,
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RESULT_HEADING}")?;
        if let Some(ref original) = self.original {
            writeln!(f, "  {ORIGINAL_HEADING}: [image, {} chars]", original.len())?;
        }
        if let Some(ref annotated) = self.annotated {
            writeln!(f, "  {ANNOTATED_HEADING}: [image, {} chars]", annotated.len())?;
        }
        match self.detections {
            DetectionList::NoneDetected => writeln!(f, "{NO_AFFECTIONS}"),
            DetectionList::Items(ref items) => {
                writeln!(f, "{DETECTIONS_HEADING}")?;
                for item in items {
                    writeln!(f, "  - {item}")?;
                }
                Ok(())
            }
        }
    }
}
