//! Error taxonomy for the genetics engine.

use thiserror::Error;

/// Failures surfaced by the registry, evaluator and breeding engine.
///
/// The engine never partially mutates caller-visible state on failure: a
/// breeding call that errors returns no offspring at all.
#[derive(Debug, Error)]
pub enum GeneticsError {
    /// Breeding was invoked with zero individuals.
    #[error("breeding pool is empty")]
    EmptyPool,

    /// A trait name was looked up that was never registered.
    #[error("unknown trait `{0}`")]
    UnknownTrait(String),

    /// The parents' weight matrices have incompatible dimensions.
    #[error("weight matrix `{matrix}` shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        matrix: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A failure while breeding one pair, tagged with the pair index.
    #[error("breeding failed for pair {pair}: {source}")]
    Breeding {
        pair: usize,
        #[source]
        source: Box<GeneticsError>,
    },
}

impl GeneticsError {
    /// The innermost error, unwrapping any per-pair wrapper.
    pub fn root_cause(&self) -> &GeneticsError {
        match self {
            GeneticsError::Breeding { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_pair_wrapper() {
        let err = GeneticsError::Breeding {
            pair: 3,
            source: Box::new(GeneticsError::ShapeMismatch {
                matrix: "wih",
                left: (2, 3),
                right: (2, 4),
            }),
        };

        assert!(matches!(
            err.root_cause(),
            GeneticsError::ShapeMismatch { matrix: "wih", .. }
        ));
    }

    #[test]
    fn test_display_includes_pair_index() {
        let err = GeneticsError::Breeding {
            pair: 1,
            source: Box::new(GeneticsError::UnknownTrait("fins".to_string())),
        };

        let msg = err.to_string();
        assert!(msg.contains("pair 1"));
        assert!(msg.contains("fins"));
    }
}
