//! Prompt orchestration
//!
//! A rejected answer makes the prompt engine redisplay the same prompt with
//! the rejection reason. Any other failure (cancel, Ctrl-C, broken terminal)
//! is returned as a [`PromptError`] and aborts the whole flow.

use std::sync::Arc;

use crate::error::{PromptError, PromptResult};
use crate::traits::UserInput;

use super::validators::Validator;

/// One text prompt: message, optional default and validator
#[derive(Clone)]
pub struct FieldSpec {
    message: String,
    default: Option<String>,
    help: Option<String>,
    validator: Option<Arc<dyn Validator>>,
}

impl FieldSpec {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            help: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }
}

/// One selection prompt over a fixed candidate list
#[derive(Debug, Clone)]
pub struct SelectSpec {
    message: String,
    options: Vec<String>,
}

impl SelectSpec {
    pub fn new(message: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            message: message.into(),
            options,
        }
    }
}

/// Runs prompts through the configured input engine
#[derive(Clone)]
pub struct Prompter {
    input: Arc<dyn UserInput>,
}

impl Prompter {
    pub fn new(input: Arc<dyn UserInput>) -> Self {
        Self { input }
    }

    /// Ask for free text; returns once the validator accepts the answer
    pub fn ask(&self, spec: &FieldSpec) -> PromptResult<String> {
        self.input.text(
            &spec.message,
            spec.default.as_deref(),
            spec.help.as_deref(),
            spec.validator.clone(),
        )
    }

    /// Ask the user to pick one of the offered options
    pub fn select(&self, spec: &SelectSpec) -> PromptResult<String> {
        if spec.options.is_empty() {
            return Err(PromptError::InvalidPrompt(format!(
                "'{}' has no options to choose from",
                spec.message
            )));
        }

        let answer = self.input.select(&spec.message, spec.options.clone())?;

        let offered = spec.options.contains(&answer);
        debug_assert!(offered, "select returned '{}' which was never offered", answer);
        if !offered {
            return Err(PromptError::NotACandidate {
                answer,
                options: spec.options.clone(),
            });
        }

        Ok(answer)
    }

    /// Ask a yes/no question
    pub fn confirm(&self, message: &str, default: bool) -> PromptResult<bool> {
        self.input.confirm(message, default)
    }
}
