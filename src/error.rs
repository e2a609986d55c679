use thiserror::Error;

/// Errors that can occur during recipe import operations
///
/// Every message is written to be shown to the user as-is; none of these
/// is fatal to the process, the user fixes the pasted text and retries.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Nothing but whitespace was pasted
    #[error("Nothing to import: the pasted text is empty")]
    EmptyInput,

    /// Fewer than name + servings + one ingredient line
    #[error(
        "Pasted recipe needs at least 3 lines (name, servings, ingredients) but only {found} were found"
    )]
    InsufficientLines { found: usize },

    /// The first line is blank
    #[error("The first line must contain the recipe name")]
    MissingName,

    /// Second line is not a recognised servings statement or out of range
    #[error(
        "The second line must state the servings between {min} and {max} (e.g. \"4 Servings\" or \"Serves 4\"), got \"{line}\""
    )]
    InvalidServings { line: String, min: u32, max: u32 },

    /// A requested serving count for rescaling is outside the accepted range
    #[error("Servings must be between {min} and {max}, got {servings}")]
    ServingsOutOfRange { servings: i32, min: u32, max: u32 },

    /// No line after the servings produced an ingredient
    #[error("No valid ingredients were found in the pasted recipe")]
    NoValidIngredients,

    /// A configured header pattern does not compile
    #[error("Invalid header pattern \"{pattern}\": {source}")]
    InvalidHeaderPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configured unit synonym points at something that is not a canonical unit
    #[error("Unit synonym \"{synonym}\" must map to a canonical unit, \"{target}\" is not one")]
    InvalidUnitSynonym { synonym: String, target: String },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The ingredient catalog collaborator failed
    #[error("Ingredient catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading the pasted text failed
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the result failed
    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),
}
