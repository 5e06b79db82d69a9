use serde_derive::{Deserialize, Serialize};

use crate::detection::MarkerObservation;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub timestamp: u64, // in milliseconds
    pub observations: Vec<MarkerObservation>,
}

impl Frame {
    pub fn new(timestamp: u64, observations: Vec<MarkerObservation>) -> Self {
        Self {
            timestamp,
            observations,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MarkerObservation> {
        self.observations.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
