use std::fmt;

/// What exactly was wrong with an artifact handed to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Fewer bytes than the fixed header needs
    TruncatedHeader(usize),
    /// Original-length field is negative
    NegativeLength(i64),
    /// Frequency counts do not add up to the original length
    CountMismatch { declared: u64, counted: u64 },
    /// Bitstream ran out after `emitted` of `expected` bytes
    TruncatedBitstream { emitted: u64, expected: u64 },
    /// A bit led off the tree (only possible for a single-leaf tree)
    InvalidCode,
}

#[derive(Debug)]
pub enum CodecError {
    InputUnavailable(std::io::Error),
    ResourceExhausted(&'static str),
    MalformedArtifact(MalformedKind),
    InputTooLarge(usize),
    /// Encoder was handed a byte its code table has no entry for
    MissingCode(u8),
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::TruncatedHeader(len) =>
                write!(f, "truncated header: {} bytes", len),
            MalformedKind::NegativeLength(len) =>
                write!(f, "negative original length {}", len),
            MalformedKind::CountMismatch { declared, counted } =>
                write!(f, "header declares {} bytes but counts sum to {}", declared, counted),
            MalformedKind::TruncatedBitstream { emitted, expected } =>
                write!(f, "bitstream exhausted after {} of {} bytes", emitted, expected),
            MalformedKind::InvalidCode =>
                write!(f, "bit sequence does not match any code"),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InputUnavailable(e) =>
                write!(f, "input unavailable: {}", e),
            CodecError::ResourceExhausted(what) =>
                write!(f, "resource exhausted while {}", what),
            CodecError::MalformedArtifact(kind) =>
                write!(f, "malformed artifact: {}", kind),
            CodecError::InputTooLarge(size) =>
                write!(f, "input too large: {} bytes", size),
            CodecError::MissingCode(byte) =>
                write!(f, "no code for byte {:#04x}", byte),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::InputUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedKind> for CodecError {
    fn from(kind: MalformedKind) -> Self {
        CodecError::MalformedArtifact(kind)
    }
}

impl CodecError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedArtifact(_))
    }
}
