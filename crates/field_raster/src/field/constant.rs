use crate::field::{DomainRange, Field};

/// Returns the same value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField {
    pub value: f32,
    pub range: Option<DomainRange>,
}

impl ConstantField {
    pub fn new(value: f32) -> Self {
        Self { value, range: None }
    }

    pub fn with_domain_range(mut self, range: DomainRange) -> Self {
        self.range = Some(range);
        self
    }
}

impl Field for ConstantField {
    fn sample(&self, _x: f64, _y: f64, _sample_size: f64) -> f32 {
        self.value
    }

    fn domain_range(&self) -> Option<DomainRange> {
        self.range
    }
}
