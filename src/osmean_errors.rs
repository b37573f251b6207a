use thiserror::Error;

#[derive(Error, Debug)]
pub enum OsmeanError {
    #[error("conversion did not converge after {iterations} iterations (last residual: {residual:.3e})")]
    NotConverged { iterations: usize, residual: f64 },

    #[error("invalid conversion parameter: {0}")]
    InvalidConversionParameter(String),

    #[error("orbit regime not supported by the {theory} theory: {reason}")]
    UnsupportedOrbitRegime {
        theory: &'static str,
        reason: String,
    },

    #[error("element set {found} is not accepted by the {theory} theory (expected {expected})")]
    UnsupportedElementSet {
        theory: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("frame {found} is not accepted by the {theory} theory (expected {expected})")]
    UnsupportedFrame {
        theory: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("orbit is not elliptic (specific energy is non-negative); mean element conversion is undefined")]
    NonEllipticOrbit,

    #[error("Jacobian of the averaging theory is singular; least-squares update cannot be solved")]
    SingularJacobian,

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("non-finite value encountered in {0}")]
    NonFiniteState(String),
}

impl PartialEq for OsmeanError {
    fn eq(&self, other: &Self) -> bool {
        use OsmeanError::*;
        match (self, other) {
            (
                NotConverged {
                    iterations: a,
                    residual: ra,
                },
                NotConverged {
                    iterations: b,
                    residual: rb,
                },
            ) => a == b && ra == rb,
            (InvalidConversionParameter(a), InvalidConversionParameter(b)) => a == b,
            (
                UnsupportedOrbitRegime {
                    theory: ta,
                    reason: a,
                },
                UnsupportedOrbitRegime {
                    theory: tb,
                    reason: b,
                },
            ) => ta == tb && a == b,
            (
                UnsupportedElementSet {
                    theory: ta,
                    expected: ea,
                    found: fa,
                },
                UnsupportedElementSet {
                    theory: tb,
                    expected: eb,
                    found: fb,
                },
            ) => ta == tb && ea == eb && fa == fb,
            (
                UnsupportedFrame {
                    theory: ta,
                    expected: ea,
                    found: fa,
                },
                UnsupportedFrame {
                    theory: tb,
                    expected: eb,
                    found: fb,
                },
            ) => ta == tb && ea == eb && fa == fb,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (NonFiniteState(a), NonFiniteState(b)) => a == b,

            // Variantes unitaires
            (NonEllipticOrbit, NonEllipticOrbit) => true,
            (SingularJacobian, SingularJacobian) => true,

            _ => false,
        }
    }
}
