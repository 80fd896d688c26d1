//! Progress report inputs.
//!
//! A progress report carries an optional sequence number and a message. The
//! caller may supply them in three shapes, all captured by [`ProgressInput`]:
//!
//! ```rust
//! use cronbeat::clients::ProgressInput;
//!
//! // Bare sequence number; the message comes from the second argument.
//! let a: ProgressInput = 50u64.into();
//!
//! // Sequence and message together.
//! let b = ProgressInput::with_message(50u64, "halfway");
//!
//! // Message-only mode: no sequence at all.
//! let c: ProgressInput = None::<u64>.into();
//! ```

use crate::error::ValidationError;

/// Maximum number of characters transmitted in a progress message.
pub const MAX_MESSAGE_CHARS: usize = 255;

/// A sequence number exactly as the caller supplied it.
///
/// Kept in its raw numeric form so that negative or fractional values reach
/// validation instead of being silently converted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequenceValue {
    /// An unsigned integer.
    Unsigned(u64),
    /// A signed integer, valid only when non-negative.
    Signed(i64),
    /// A float, valid only when finite, integral and non-negative.
    Float(f64),
}

impl SequenceValue {
    /// Validates the value as a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProgressSequence`] for negative,
    /// fractional, non-finite, or out-of-range values.
    pub fn validate(self) -> Result<u64, ValidationError> {
        match self {
            Self::Unsigned(n) => Ok(n),
            Self::Signed(n) => u64::try_from(n).map_err(|_| self.invalid()),
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            Self::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 {
                    Ok(n as u64)
                } else {
                    Err(self.invalid())
                }
            }
        }
    }

    fn invalid(self) -> ValidationError {
        let value = match self {
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        };
        ValidationError::InvalidProgressSequence { value }
    }
}

macro_rules! sequence_from {
    ($variant:ident => $($t:ty),+) => {
        $(
            impl From<$t> for SequenceValue {
                fn from(value: $t) -> Self {
                    Self::$variant(value.into())
                }
            }

            impl From<$t> for ProgressInput {
                fn from(value: $t) -> Self {
                    Self::Sequence(value.into())
                }
            }

            impl From<Option<$t>> for ProgressInput {
                fn from(value: Option<$t>) -> Self {
                    value.map_or(Self::Omitted, |v| Self::Sequence(v.into()))
                }
            }
        )+
    };
}

sequence_from!(Unsigned => u64, u32, u16, u8);
sequence_from!(Signed => i64, i32, i16, i8);
sequence_from!(Float => f64, f32);

impl From<usize> for SequenceValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Float(f64::INFINITY), Self::Unsigned)
    }
}

impl From<usize> for ProgressInput {
    fn from(value: usize) -> Self {
        Self::Sequence(value.into())
    }
}

impl From<Option<usize>> for ProgressInput {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Self::Omitted, |v| Self::Sequence(v.into()))
    }
}

/// Sequence and message supplied together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressUpdate {
    /// Sequence number, absent in message-only mode.
    pub seq: Option<SequenceValue>,
    /// Free-text message.
    pub message: Option<String>,
}

/// The first argument of a progress report.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProgressInput {
    /// No sequence number; message-only mode.
    #[default]
    Omitted,
    /// A bare sequence number.
    Sequence(SequenceValue),
    /// A structured update carrying its own message.
    Update(ProgressUpdate),
}

impl ProgressInput {
    /// Creates a structured update with both a sequence and a message.
    #[must_use]
    pub fn with_message(seq: impl Into<SequenceValue>, message: impl Into<String>) -> Self {
        Self::Update(ProgressUpdate {
            seq: Some(seq.into()),
            message: Some(message.into()),
        })
    }

    /// Creates a structured update carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Update(ProgressUpdate {
            seq: None,
            message: Some(message.into()),
        })
    }

    /// Resolves the input into a validated sequence and a truncated message.
    ///
    /// For [`ProgressInput::Sequence`] and [`ProgressInput::Omitted`] the
    /// message is taken from `fallback_message`. A
    /// [`ProgressInput::Update`] always uses its own message, ignoring the
    /// fallback. A missing message becomes the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProgressSequence`] if a sequence is
    /// present and is not a non-negative integer.
    pub fn resolve(
        self,
        fallback_message: Option<&str>,
    ) -> Result<(Option<u64>, String), ValidationError> {
        let (seq, message) = match self {
            Self::Omitted => (None, fallback_message.map(String::from)),
            Self::Sequence(seq) => (Some(seq), fallback_message.map(String::from)),
            Self::Update(update) => (update.seq, update.message),
        };

        let seq = seq.map(SequenceValue::validate).transpose()?;
        let message = truncate_message(&message.unwrap_or_default());

        Ok((seq, message))
    }
}

impl From<ProgressUpdate> for ProgressInput {
    fn from(update: ProgressUpdate) -> Self {
        Self::Update(update)
    }
}

/// Truncates a message to at most [`MAX_MESSAGE_CHARS`] characters.
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
#[must_use]
pub fn truncate_message(message: &str) -> String {
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((byte_index, _)) => message[..byte_index].to_string(),
        None => message.to_string(),
    }
}
