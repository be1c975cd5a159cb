use std::fmt;

/// Fatal failures raised while prompting
///
/// A validation rejection is never a `PromptError`; the prompt engine
/// redisplays the prompt instead. Everything here aborts the running flow.
#[derive(Debug)]
pub enum PromptError {
    /// User pressed ESC or otherwise cancelled the prompt
    Cancelled,

    /// User pressed Ctrl-C
    Interrupted,

    /// Input stream is not an interactive terminal
    NotInteractive,

    /// Prompt could not be rendered with the given configuration
    InvalidPrompt(String),

    /// A validator failed to run (as opposed to rejecting the input)
    Validator(String),

    /// Select answer was not one of the offered candidates
    NotACandidate { answer: String, options: Vec<String> },

    /// Scripted input ran out or returned the wrong kind of answer
    UnexpectedInput(String),

    /// Terminal I/O failure
    Io(std::io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Cancelled => write!(f, "Prompt was cancelled"),
            PromptError::Interrupted => write!(f, "Prompt was interrupted"),
            PromptError::NotInteractive => {
                write!(f, "Input is not an interactive terminal")
            }
            PromptError::InvalidPrompt(msg) => {
                write!(f, "Invalid prompt configuration: {}", msg)
            }
            PromptError::Validator(msg) => {
                write!(f, "Validator failed: {}", msg)
            }
            PromptError::NotACandidate { answer, options } => {
                write!(
                    f,
                    "Answer '{}' is not one of the offered options: {}",
                    answer,
                    options.join(", ")
                )
            }
            PromptError::UnexpectedInput(msg) => {
                write!(f, "Unexpected input: {}", msg)
            }
            PromptError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::Io(err)
    }
}

impl From<inquire::InquireError> for PromptError {
    fn from(err: inquire::InquireError) -> Self {
        use inquire::InquireError;

        match err {
            InquireError::OperationCanceled => PromptError::Cancelled,
            InquireError::OperationInterrupted => PromptError::Interrupted,
            InquireError::NotTTY => PromptError::NotInteractive,
            InquireError::InvalidConfiguration(msg) => PromptError::InvalidPrompt(msg),
            InquireError::IO(err) => PromptError::Io(err),
            InquireError::Custom(err) => PromptError::Validator(err.to_string()),
        }
    }
}

/// Result type for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquire_errors_map_to_fatal_variants() {
        let err: PromptError = inquire::InquireError::OperationInterrupted.into();
        assert!(matches!(err, PromptError::Interrupted));

        let err: PromptError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(err, PromptError::Cancelled));
    }

    #[test]
    fn test_not_a_candidate_display() {
        let err = PromptError::NotACandidate {
            answer: "ruby".to_string(),
            options: vec!["java".to_string(), "nodejs".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Answer 'ruby' is not one of the offered options: java, nodejs"
        );
    }
}
