use thiserror::Error;

/// Returned by the generated `FromStr` of a tag enum when the string names
/// none of its tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag `{input}` for sum type `{sum}`")]
pub struct ParseTagError {
    sum: &'static str,
    input: String,
}

impl ParseTagError {
    pub fn new(sum: &'static str, input: impl Into<String>) -> Self {
        ParseTagError {
            sum,
            input: input.into(),
        }
    }

    /// Name of the sum type whose tags were searched.
    pub fn sum(&self) -> &'static str {
        self.sum
    }

    /// The rejected string.
    pub fn input(&self) -> &str {
        &self.input
    }
}
