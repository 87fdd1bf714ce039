use thiserror::Error;

/// Errors that can occur while planning a meal from fridge uploads
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Model response contained no brace- or bracket-delimited block
    #[error("Response does not contain a JSON object or array")]
    NoJsonBlock,

    /// Recipe generation was invoked with an empty ingredient list
    #[error("Cannot generate a recipe without any ingredients")]
    EmptyIngredients,

    /// Nothing edible was recognized across uploads and manual input
    #[error("No ingredients detected in the provided files. Try a clearer fridge photo.")]
    NoIngredients,

    /// The completion service failed; the message is safe to show to users
    #[error("{0}")]
    Service(String),

    /// Missing credential or invalid setting value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings could not be loaded from file or environment
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}
