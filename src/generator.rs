//! Random password generation.
//!
//! Passwords are drawn uniformly, with replacement, from a character pool
//! assembled from a [`GeneratorPolicy`]. Lowercase letters are always part of
//! the pool; uppercase letters, digits and symbols are optional.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strength::{self, StrengthLabel};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Errors raised when a policy cannot produce a password.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid generator policy: {0}")]
    InvalidPolicy(String),

    #[error("password length {length} is outside the allowed range {min}..={max}")]
    OutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },
}

/// Which character classes participate in generation, and how long the result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorPolicy {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        Self {
            length: 12,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl GeneratorPolicy {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 32;

    /// Policy with only the always-on lowercase class.
    pub fn lowercase_only(length: usize) -> Self {
        Self {
            length,
            include_uppercase: false,
            include_numbers: false,
            include_symbols: false,
        }
    }

    /// Sets the length, clamped into the allowed range.
    pub fn with_length_clamped(mut self, length: usize) -> Self {
        self.length = length.clamp(Self::MIN_LENGTH, Self::MAX_LENGTH);
        self
    }

    pub fn with_uppercase(mut self, on: bool) -> Self {
        self.include_uppercase = on;
        self
    }

    pub fn with_numbers(mut self, on: bool) -> Self {
        self.include_numbers = on;
        self
    }

    pub fn with_symbols(mut self, on: bool) -> Self {
        self.include_symbols = on;
        self
    }

    /// Checks the length bound. Zero is a malformed policy rather than a range miss.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.length == 0 {
            return Err(GeneratorError::InvalidPolicy(
                "length must be a positive integer".to_string(),
            ));
        }
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&self.length) {
            return Err(GeneratorError::OutOfRange {
                length: self.length,
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(())
    }
}

/// The characters a policy draws from, in assembly order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    chars: Vec<char>,
}

impl CharacterPool {
    pub fn for_policy(policy: &GeneratorPolicy) -> Self {
        let mut chars: Vec<char> = LOWERCASE.chars().collect();
        if policy.include_uppercase {
            chars.extend(UPPERCASE.chars());
        }
        if policy.include_numbers {
            chars.extend(DIGITS.chars());
        }
        if policy.include_symbols {
            chars.extend(SYMBOLS.chars());
        }
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Position of `c` in the pool, if present.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&p| p == c)
    }
}

/// Generates a password using the thread-local cryptographically secure RNG.
pub fn generate(policy: &GeneratorPolicy) -> Result<String, GeneratorError> {
    generate_with(policy, &mut rand::rng())
}

/// Generates a password drawing from the supplied random source.
pub fn generate_with<R: Rng>(
    policy: &GeneratorPolicy,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    policy.validate()?;

    let pool = CharacterPool::for_policy(policy);
    if pool.is_empty() {
        return Err(GeneratorError::InvalidPolicy(
            "character pool is empty".to_string(),
        ));
    }

    let chars = pool.as_slice();
    let password: String = (0..policy.length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect();

    log::debug!(
        "Generated password of length {} from a pool of {} characters",
        policy.length,
        pool.len()
    );
    Ok(password)
}

/// A generated value together with the score computed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPassword {
    pub value: String,
    pub strength: u8,
}

impl GeneratedPassword {
    /// Scores an existing value. The score depends on the value only.
    pub fn from_value(value: String) -> Self {
        let strength = strength::estimate_strength(&value);
        Self { value, strength }
    }

    pub fn label(&self) -> StrengthLabel {
        strength::classify(self.strength)
    }
}

/// Holds the current policy and the suggestion shown for it.
///
/// The panel is either idle (no suggestion) or holds exactly one
/// [`GeneratedPassword`]. Regenerating replaces value and score together, and a
/// failed generation leaves the previous suggestion in place.
#[derive(Debug, Clone, Default)]
pub struct GeneratorPanel {
    policy: GeneratorPolicy,
    current: Option<GeneratedPassword>,
}

impl GeneratorPanel {
    pub fn new(policy: GeneratorPolicy) -> Self {
        Self {
            policy,
            current: None,
        }
    }

    pub fn policy(&self) -> &GeneratorPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: GeneratorPolicy) {
        self.policy = policy;
    }

    pub fn current(&self) -> Option<&GeneratedPassword> {
        self.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn generate(&mut self) -> Result<&GeneratedPassword, GeneratorError> {
        self.generate_with(&mut rand::rng())
    }

    pub fn generate_with<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<&GeneratedPassword, GeneratorError> {
        let value = generate_with(&self.policy, rng)?;
        Ok(self.current.insert(GeneratedPassword::from_value(value)))
    }

    /// Shows a value produced elsewhere, such as a server-side suggestion.
    pub fn show(&mut self, suggestion: GeneratedPassword) {
        self.current = Some(suggestion);
    }

    /// Hands out the current value and returns to idle.
    pub fn take(&mut self) -> Option<GeneratedPassword> {
        self.current.take()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
