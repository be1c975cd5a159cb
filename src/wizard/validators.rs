//! Stateless field validators
//!
//! Every validator enforces one grammar and returns a [`Verdict`]. Only the
//! existence-checking [`PathValidator`] variants touch the filesystem, and a
//! flow opts into those explicitly. Validators chain with [`AllOf`].

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::traits::FileSystem;

const MAX_NAME_LENGTH: usize = 63;

/// Protocol assumed for a port token without an explicit `/protocol` suffix
pub const DEFAULT_PORT_PROTOCOL: &str = "tcp";

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap();
    static ref PORT_PATTERN: Regex = Regex::new(r"(?i)^([0-9]+)(/(tcp|udp))?$").unwrap();
}

/// Outcome of validating a single input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(String),
}

impl Verdict {
    pub fn reject(reason: impl Into<String>) -> Self {
        Verdict::Reject(reason.into())
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    /// Reason attached to a rejection, if any
    #[cfg(test)]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject(reason) => Some(reason),
        }
    }
}

/// A single validation capability attached to a prompt field
pub trait Validator: Send + Sync {
    fn validate(&self, input: &str) -> Verdict;
}

/// Rejects empty or whitespace-only input
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, input: &str) -> Verdict {
        if input.trim().is_empty() {
            Verdict::reject("Value is required")
        } else {
            Verdict::Accept
        }
    }
}

/// Enforces the DNS label grammar the cluster requires for resource names
#[derive(Debug, Clone, Copy, Default)]
pub struct NameValidator;

impl Validator for NameValidator {
    fn validate(&self, input: &str) -> Verdict {
        validate_name(input)
    }
}

/// Validate a resource name
pub fn validate_name(name: &str) -> Verdict {
    if name.is_empty() {
        return Verdict::reject("Name is required and cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        return Verdict::reject(format!(
            "'{}' is not a valid name: must be no more than {} characters",
            name, MAX_NAME_LENGTH
        ));
    }

    if !NAME_PATTERN.is_match(name) {
        return Verdict::reject(format!(
            "'{}' is not a valid name: must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character",
            name
        ));
    }

    if name.chars().all(|c| c.is_ascii_digit()) {
        return Verdict::reject(format!(
            "'{}' is not a valid name: it must not be purely numeric",
            name
        ));
    }

    Verdict::Accept
}

/// What a path must point at, beyond being syntactically valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathRequirement {
    Any,
    Directory,
    File,
}

/// Checks that input is a usable filesystem path
#[derive(Clone)]
pub struct PathValidator {
    fs: Option<Arc<dyn FileSystem>>,
    requirement: PathRequirement,
}

impl PathValidator {
    /// Syntactic check only; the path does not need to exist yet
    pub fn syntactic() -> Self {
        Self {
            fs: None,
            requirement: PathRequirement::Any,
        }
    }

    /// Require an existing directory (local source)
    pub fn existing_dir(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs: Some(fs),
            requirement: PathRequirement::Directory,
        }
    }

    /// Require an existing file (binary source)
    pub fn existing_file(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs: Some(fs),
            requirement: PathRequirement::File,
        }
    }
}

impl Validator for PathValidator {
    fn validate(&self, input: &str) -> Verdict {
        if input.trim().is_empty() {
            return Verdict::reject("Path is required");
        }

        if input.contains('\0') {
            return Verdict::reject(format!("'{}' is not a valid path", input.escape_default()));
        }

        let Some(fs) = &self.fs else {
            return Verdict::Accept;
        };

        let path = Path::new(input);
        match self.requirement {
            PathRequirement::Any => Verdict::Accept,
            PathRequirement::Directory if fs.is_dir(path) => Verdict::Accept,
            PathRequirement::File if fs.is_file(path) => Verdict::Accept,
            PathRequirement::Directory => {
                Verdict::reject(format!("Directory '{}' does not exist", input))
            }
            PathRequirement::File => Verdict::reject(format!("File '{}' does not exist", input)),
        }
    }
}

/// Validates `port[/protocol]` lists such as `8080,8100/tcp,9100/udp`
#[derive(Debug, Clone, Copy, Default)]
pub struct PortsValidator;

impl Validator for PortsValidator {
    fn validate(&self, input: &str) -> Verdict {
        for token in split_values(input) {
            if let Err(reason) = parse_port(&token) {
                return Verdict::Reject(reason);
            }
        }
        Verdict::Accept
    }
}

/// A single port token after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub port: u16,
    pub protocol: String,
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// Parse one `port[/protocol]` token
pub fn parse_port(token: &str) -> Result<PortSpec, String> {
    let captures = PORT_PATTERN.captures(token).ok_or_else(|| {
        format!(
            "Port '{}' is not valid: expected format is port[/protocol], for example 8080 or 9100/udp",
            token
        )
    })?;

    let port = captures[1]
        .parse::<u32>()
        .ok()
        .filter(|p| (1..=65535).contains(p))
        .ok_or_else(|| format!("Port '{}' is out of range: must be between 1 and 65535", token))?;

    let protocol = captures
        .get(3)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| DEFAULT_PORT_PROTOCOL.to_string());

    Ok(PortSpec {
        port: port as u16,
        protocol,
    })
}

/// Validates `KEY=VALUE` lists such as `MY_TYPE=backend,PROFILE=dev`
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueValidator;

impl Validator for KeyValueValidator {
    fn validate(&self, input: &str) -> Verdict {
        for token in split_values(input) {
            let mut parts = token.split('=');
            let key = parts.next().unwrap_or_default();
            let separators = parts.count();

            if separators != 1 {
                return Verdict::reject(format!(
                    "'{}' is not valid: expected exactly one '=' in KEY=VALUE",
                    token
                ));
            }

            if key.trim().is_empty() {
                return Verdict::reject(format!("'{}' is not valid: KEY must not be empty", token));
            }
        }
        Verdict::Accept
    }
}

/// Runs validators in order, stopping at the first rejection
#[derive(Clone, Default)]
pub struct AllOf {
    validators: Vec<Arc<dyn Validator>>,
}

impl AllOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }
}

impl Validator for AllOf {
    fn validate(&self, input: &str) -> Verdict {
        for validator in &self.validators {
            let verdict = validator.validate(input);
            if !verdict.is_accept() {
                return verdict;
            }
        }
        Verdict::Accept
    }
}

/// Split a comma separated answer into trimmed, non-empty tokens
pub fn split_values(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
