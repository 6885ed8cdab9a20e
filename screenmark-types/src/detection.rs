use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// Which pass produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetectionSource {
    Icon,
    Text,
}

/// A located, tagged region of interest in an image.
///
/// Detections are immutable values; reconciliation builds new sets rather
/// than mutating inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub bbox: BoundingBox,
    pub source: DetectionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Detection {
    /// An icon/element box awaiting a caption.
    pub fn icon(bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            bbox,
            source: DetectionSource::Icon,
            content: None,
            confidence: Some(confidence),
        }
    }

    /// A recognized text box.
    pub fn text(bbox: BoundingBox, content: impl Into<String>) -> Self {
        Self {
            bbox,
            source: DetectionSource::Text,
            content: Some(content.into()),
            confidence: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Ordered, append-only sequence of detections from one pass.
///
/// Position is the only implicit ordering; it supplies stable indices for
/// overlay labels and the tie-break order during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet(Vec<Detection>);

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, detection: Detection) {
        self.0.push(detection);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Detection> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Detection> {
        self.0
    }
}

impl From<Vec<Detection>> for DetectionSet {
    fn from(detections: Vec<Detection>) -> Self {
        Self(detections)
    }
}

impl FromIterator<Detection> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = Detection>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for DetectionSet {
    type Output = Detection;

    fn index(&self, index: usize) -> &Detection {
        &self.0[index]
    }
}
