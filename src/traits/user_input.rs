use crate::error::{PromptError, PromptResult};
use crate::wizard::validators::{Validator, Verdict};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Response type for mock user input
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Select(String),
    Text(String),
    Confirm(bool),
    /// Simulate the user pressing Ctrl-C
    Interrupt,
}

/// Trait for user input operations to enable testing with mocks
///
/// Implementations redisplay a text prompt while its validator rejects the
/// answer; only terminal failures surface as errors.
pub trait UserInput: Send + Sync {
    /// Display a selection prompt with options
    fn select(&self, prompt: &str, options: Vec<String>) -> PromptResult<String>;

    /// Display a text input prompt
    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        help: Option<&str>,
        validator: Option<Arc<dyn Validator>>,
    ) -> PromptResult<String>;

    /// Display a confirmation prompt (yes/no)
    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<bool>;
}

/// Real user input implementation using inquire crate
pub struct InquireUserInput;

impl UserInput for InquireUserInput {
    fn select(&self, prompt: &str, options: Vec<String>) -> PromptResult<String> {
        use inquire::Select;
        let answer = Select::new(prompt, options).prompt()?;
        Ok(answer)
    }

    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        help: Option<&str>,
        validator: Option<Arc<dyn Validator>>,
    ) -> PromptResult<String> {
        use inquire::Text;
        use inquire::validator::Validation;

        let mut text_prompt = Text::new(prompt);
        if let Some(default_val) = default {
            text_prompt = text_prompt.with_default(default_val);
        }
        if let Some(help_msg) = help {
            text_prompt = text_prompt.with_help_message(help_msg);
        }
        if let Some(validator) = validator {
            text_prompt = text_prompt.with_validator(move |input: &str| {
                Ok(match validator.validate(input) {
                    Verdict::Accept => Validation::Valid,
                    Verdict::Reject(reason) => Validation::Invalid(reason.into()),
                })
            });
        }
        let answer = text_prompt.prompt()?;
        Ok(answer)
    }

    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<bool> {
        use inquire::Confirm;
        let answer = Confirm::new(prompt).with_default(default).prompt()?;
        Ok(answer)
    }
}

/// Mock user input implementation for testing
///
/// A rejected text answer is recorded and the next scripted response is
/// consumed, the same way a terminal user would retype after seeing the reason.
#[allow(dead_code)]
pub struct MockUserInput {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    offered: Mutex<Vec<Vec<String>>>,
    rejections: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockUserInput {
    /// Create new mock with no pre-configured responses
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create mock with pre-configured responses
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            offered: Mutex::new(Vec::new()),
            rejections: Mutex::new(Vec::new()),
        }
    }

    /// Add a response to the queue
    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Messages of every prompt displayed so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Option lists of every select prompt, in order
    pub fn offered_options(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }

    /// Rejection reasons shown to the user so far
    pub fn rejections(&self) -> Vec<String> {
        self.rejections.lock().unwrap().clone()
    }

    /// Number of scripted responses not consumed yet
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn record_prompt(&self, prompt: &str) {
        self.prompts.lock().unwrap().push(prompt.to_string());
    }

    /// Get the next response from the queue
    fn next_response(&self) -> PromptResult<MockResponse> {
        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Interrupt) => Err(PromptError::Interrupted),
            Some(response) => Ok(response),
            None => Err(PromptError::UnexpectedInput(
                "No more mock responses available".to_string(),
            )),
        }
    }
}

impl Default for MockUserInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for MockUserInput {
    fn select(&self, prompt: &str, options: Vec<String>) -> PromptResult<String> {
        self.record_prompt(prompt);
        self.offered.lock().unwrap().push(options.clone());
        match self.next_response()? {
            MockResponse::Select(answer) => {
                // The real widget only returns listed options
                if options.contains(&answer) {
                    Ok(answer)
                } else {
                    Err(PromptError::UnexpectedInput(format!(
                        "Mock response '{}' is not in the provided options: {:?}",
                        answer, options
                    )))
                }
            }
            _ => Err(PromptError::UnexpectedInput(
                "Expected Select response but got a different type".to_string(),
            )),
        }
    }

    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        _help: Option<&str>,
        validator: Option<Arc<dyn Validator>>,
    ) -> PromptResult<String> {
        self.record_prompt(prompt);
        loop {
            let answer = match self.next_response()? {
                MockResponse::Text(answer) => answer,
                _ => {
                    return Err(PromptError::UnexpectedInput(
                        "Expected Text response but got a different type".to_string(),
                    ));
                }
            };

            let answer = match default {
                Some(default_val) if answer.is_empty() => default_val.to_string(),
                _ => answer,
            };

            match validator.as_ref().map(|v| v.validate(&answer)) {
                Some(Verdict::Reject(reason)) => {
                    self.rejections.lock().unwrap().push(reason);
                }
                _ => return Ok(answer),
            }
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> PromptResult<bool> {
        self.record_prompt(prompt);
        match self.next_response()? {
            MockResponse::Confirm(answer) => Ok(answer),
            _ => Err(PromptError::UnexpectedInput(
                "Expected Confirm response but got a different type".to_string(),
            )),
        }
    }
}
