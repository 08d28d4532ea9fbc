use thiserror::Error;

#[derive(Error, Debug)]
pub enum CagedError {
    /// A shape name outside the five CAGED labels.
    #[error("Unknown shape '{0}': expected one of C, A, G, E, D")]
    UnknownShape(String),

    /// A key name that is not one of the twelve pitch classes.
    #[error("Unknown key '{0}': expected a note name like C, F#, or Bb")]
    UnknownKey(String),

    /// Serialization failure while emitting the static tables.
    #[error("Failed to serialize tables: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
