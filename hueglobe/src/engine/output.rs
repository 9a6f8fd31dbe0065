//! Where the sampled color goes.

use crate::utils::Sample;

/// How a sample is turned into the widget's visible output.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutputPolicy {
    /// `#rrggbb` in the text output field
    #[default]
    Hex,
    /// `rgb(r, g, b)` as the page background
    Background,
}

impl OutputPolicy {
    pub fn format(&self, sample: Sample) -> String {
        match self {
            OutputPolicy::Hex => sample.to_hex(),
            OutputPolicy::Background => sample.to_css_rgb(),
        }
    }
}

/// Receives every published sample together with its formatted text.
pub trait ColorSink: 'static {
    fn publish(&mut self, sample: Sample, text: &str);
}

impl<F> ColorSink for F
where
    F: FnMut(Sample, &str) + 'static,
{
    fn publish(&mut self, sample: Sample, text: &str) {
        self(sample, text)
    }
}

/// One frame's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOutput {
    pub sample: Sample,
    pub text: String,
    pub policy: OutputPolicy,
}

impl ColorOutput {
    pub fn new(sample: Sample, policy: OutputPolicy) -> Self {
        ColorOutput {
            sample,
            text: policy.format(sample),
            policy,
        }
    }
}
