use log::{debug, info};

use crate::affinity::CapacityAffinity;
use crate::counter::DecisionCounter;
use crate::errors::AdmissionError;
use crate::{metrics, patch, review};

/// Drives one admission call from raw body to raw response, sharing a single
/// `DecisionCounter` across all concurrent calls.
#[derive(Debug, Default)]
pub struct AffinityMutator {
    counter: DecisionCounter,
}

impl AffinityMutator {
    pub fn new(counter: DecisionCounter) -> Self {
        AffinityMutator { counter }
    }

    pub fn decided(&self) -> u64 {
        self.counter.current()
    }

    /// Handle a raw `AdmissionReview` body.
    ///
    /// Decode errors return before the counter is touched. The counter is advanced before the
    /// response is built, so an encode failure still consumes a slot.
    pub fn review(&self, body: &[u8]) -> Result<Vec<u8>, AdmissionError> {
        let request = review::decode(body)?;
        debug!("Decoded admission request '{}' for pod '{}'", request.uid, request.pod_name());

        let (observed, affinity) = self.decide();
        info!(
            "Admission request '{}' observed counter {}, patching pod '{}' with {} affinity",
            request.uid,
            observed,
            request.pod_name(),
            affinity.label()
        );

        let response = patch::assemble(&affinity, &request.uid)?;
        review::encode(&request.api_version, response)
    }

    fn decide(&self) -> (u64, CapacityAffinity) {
        let mut slot = self.counter.acquire();
        let observed = slot.peek();
        let affinity = CapacityAffinity::decide(observed);
        slot.advance();
        metrics::decision_made(affinity.label(), slot.peek());
        (observed, affinity)
    }
}
