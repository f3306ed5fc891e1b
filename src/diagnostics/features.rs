use super::TimingBreakdown;
use crate::features::FeatureVector;
use crate::pipeline::PipelineOutput;
use crate::segments::Segment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedFeature {
    pub name: String,
    pub value: f64,
}

/// Intermediates of one pipeline run on a single image.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureReport {
    pub input: PathBuf,
    pub width: usize,
    pub height: usize,
    pub mask_on_pixels: usize,
    pub features: Vec<NamedFeature>,
    pub segments: Vec<Segment>,
    pub timings: TimingBreakdown,
}

impl FeatureReport {
    pub fn from_output(input: impl Into<PathBuf>, out: &PipelineOutput) -> Self {
        Self {
            input: input.into(),
            width: out.mask.width(),
            height: out.mask.height(),
            mask_on_pixels: out.mask.on_count(),
            features: named(&out.features),
            segments: out.segments.clone(),
            timings: out.timing.clone(),
        }
    }
}

fn named(features: &FeatureVector) -> Vec<NamedFeature> {
    features
        .named()
        .into_iter()
        .map(|(name, value)| NamedFeature {
            name: name.to_string(),
            value,
        })
        .collect()
}
