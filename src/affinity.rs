use k8s_openapi::api::core::v1::{
    Affinity, NodeAffinity, NodeSelector, NodeSelectorRequirement, NodeSelectorTerm, PreferredSchedulingTerm,
};

pub const CAPACITY_LABEL: &str = "node.kubernetes.io/capacity";
pub const ON_DEMAND: &str = "on-demand";
pub const SPOT: &str = "spot";
pub const SPOT_PREFERENCE_WEIGHT: i32 = 10;

const OPERATOR_IN: &str = "In";

/// The two node affinities the webhook hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityAffinity {
    /// Hard requirement for on-demand capacity
    Required,
    /// Weighted soft preference for spot capacity
    Preferred,
}

impl CapacityAffinity {
    /// The first pod this process decides on is pinned to on-demand capacity,
    /// every later one only prefers spot.
    pub fn decide(decided_so_far: u64) -> Self {
        if decided_so_far == 0 {
            CapacityAffinity::Required
        } else {
            CapacityAffinity::Preferred
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapacityAffinity::Required => "required",
            CapacityAffinity::Preferred => "preferred",
        }
    }

    pub fn to_affinity(&self) -> Affinity {
        let node_affinity = match self {
            CapacityAffinity::Required => NodeAffinity {
                required_during_scheduling_ignored_during_execution: Some(NodeSelector {
                    node_selector_terms: vec![capacity_term(ON_DEMAND)],
                }),
                ..NodeAffinity::default()
            },
            CapacityAffinity::Preferred => NodeAffinity {
                preferred_during_scheduling_ignored_during_execution: Some(vec![PreferredSchedulingTerm {
                    weight: SPOT_PREFERENCE_WEIGHT,
                    preference: capacity_term(SPOT),
                }]),
                ..NodeAffinity::default()
            },
        };
        Affinity {
            node_affinity: Some(node_affinity),
            ..Affinity::default()
        }
    }
}

fn capacity_term(capacity: &str) -> NodeSelectorTerm {
    NodeSelectorTerm {
        match_expressions: Some(vec![NodeSelectorRequirement {
            key: CAPACITY_LABEL.to_owned(),
            operator: OPERATOR_IN.to_owned(),
            values: Some(vec![capacity.to_owned()]),
        }]),
        ..NodeSelectorTerm::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decide() {
        assert_eq!(CapacityAffinity::decide(0), CapacityAffinity::Required);
        assert_eq!(CapacityAffinity::decide(1), CapacityAffinity::Preferred);
        assert_eq!(CapacityAffinity::decide(49), CapacityAffinity::Preferred);
        assert_eq!(CapacityAffinity::decide(u64::MAX), CapacityAffinity::Preferred);
    }

    #[test]
    fn test_required_affinity_shape() {
        let value = serde_json::to_value(CapacityAffinity::Required.to_affinity()).unwrap();
        assert_eq!(
            value,
            json!({"nodeAffinity": {"requiredDuringSchedulingIgnoredDuringExecution": {"nodeSelectorTerms": [
                {"matchExpressions": [{"key": "node.kubernetes.io/capacity", "operator": "In", "values": ["on-demand"]}]}
            ]}}})
        );
    }

    #[test]
    fn test_preferred_affinity_shape() {
        let value = serde_json::to_value(CapacityAffinity::Preferred.to_affinity()).unwrap();
        assert_eq!(
            value,
            json!({"nodeAffinity": {"preferredDuringSchedulingIgnoredDuringExecution": [
                {"weight": 10, "preference": {"matchExpressions": [
                    {"key": "node.kubernetes.io/capacity", "operator": "In", "values": ["spot"]}
                ]}}
            ]}})
        );
    }
}
