use crate::shared::detection::Detection;
use crate::shared::mask::union_mask;

/// A detection together with the number of raw fragments folded into it.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedDetection {
    pub detection: Detection,
    pub fragments: usize,
}

impl MergedDetection {
    /// Folds `other` in: rectangle union, mask union, max confidence.
    ///
    /// The class id of `self` is kept. `other` is consumed.
    pub fn absorb(&mut self, other: MergedDetection) {
        let target = &mut self.detection;
        let source = other.detection;

        if !target.is_consistent() || !source.is_consistent() {
            log::warn!(
                "Merging fragment with mismatched mask ({:?} into {:?}); overflow is clipped",
                source.rect,
                target.rect
            );
        }

        let rect = target.rect.union(&source.rect);
        target.mask = union_mask(&target.mask, &target.rect, &source.mask, &source.rect);
        target.rect = rect;
        target.confidence = target.confidence.max(source.confidence);
        self.fragments += other.fragments;
    }
}

impl From<Detection> for MergedDetection {
    fn from(detection: Detection) -> Self {
        Self {
            detection,
            fragments: 1,
        }
    }
}

/// Working list of detections that may still absorb further fragments.
///
/// Entries keep insertion order; matching is first-match-wins over that
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeGroup {
    entries: Vec<MergedDetection>,
}

impl MergeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MergedDetection] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `candidate` as a new entry without matching.
    pub fn with(mut self, candidate: MergedDetection) -> Self {
        self.entries.push(candidate);
        self
    }

    /// Merges `candidate` into the first entry accepted by `is_match`, or
    /// appends it as a new entry.
    ///
    /// Zero-area rectangles never match, on either side.
    pub fn absorb_first<F>(mut self, candidate: MergedDetection, mut is_match: F) -> Self
    where
        F: FnMut(&Detection, &Detection) -> bool,
    {
        if candidate.detection.rect.is_empty() {
            return self.with(candidate);
        }

        let hit = self.entries.iter().position(|entry| {
            !entry.detection.rect.is_empty() && is_match(&entry.detection, &candidate.detection)
        });

        match hit {
            Some(idx) => {
                log::debug!(
                    "Fragment {:?} joins group {:?}",
                    candidate.detection.rect,
                    self.entries[idx].detection.rect
                );
                self.entries[idx].absorb(candidate);
            }
            None => self.entries.push(candidate),
        }
        self
    }

    pub fn into_entries(self) -> Vec<MergedDetection> {
        self.entries
    }
}

impl IntoIterator for MergeGroup {
    type Item = MergedDetection;
    type IntoIter = std::vec::IntoIter<MergedDetection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
