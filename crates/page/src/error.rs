use html::FatalError;
use std::fmt;

/// Terminal failure of a parse session. No document is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageError {
    Parse(FatalError),
}

impl PageError {
    pub fn position(&self) -> usize {
        match self {
            PageError::Parse(FatalError::MalformedEndTagOpen { position, .. })
            | PageError::Parse(FatalError::TreeMismatch { position, .. }) => *position,
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Parse(err) => write!(f, "parse aborted: {err}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Parse(err) => Some(err),
        }
    }
}

impl From<FatalError> for PageError {
    fn from(err: FatalError) -> Self {
        PageError::Parse(err)
    }
}
