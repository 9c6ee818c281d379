use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynergyError {
    #[error("Pair '{0}' + '{0}' pairs a detector with itself")]
    SelfPair(String),

    #[error("Pair references unknown detector '{0}'")]
    UnknownDetector(String),

    #[error("Synergy score {score} for '{a}' + '{b}' exceeds 100")]
    ScoreOutOfRange { a: String, b: String, score: u8 },

    #[error("Pair '{a}' + '{b}' appears more than once in the {table} table")]
    DuplicatePair {
        a: String,
        b: String,
        table: &'static str,
    },
}
