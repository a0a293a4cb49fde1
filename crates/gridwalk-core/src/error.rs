//! Error type shared by the gridwalk crates.

/// Failures raised at configuration time, before any grid mutation.
///
/// "No path" and cancellation are ordinary outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An algorithm or generator name did not match any known variant.
    #[error("{kind} `{name}` not found")]
    NotFound { kind: &'static str, name: String },
    /// The grid is not in a state the requested operation can run on.
    #[error("precondition failed: {0}")]
    PreconditionFailed(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = Error::NotFound {
            kind: "pathfinding algorithm",
            name: "bfs".to_string(),
        };
        assert_eq!(e.to_string(), "pathfinding algorithm `bfs` not found");
        let e = Error::PreconditionFailed("start and end must both be set");
        assert_eq!(
            e.to_string(),
            "precondition failed: start and end must both be set"
        );
    }
}
