use thiserror::Error;

/// Failure reported by a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid slot name '{0}'")]
    InvalidKey(String),
    #[error("{0}")]
    Backend(String),
}

/// A recovered fault on one of the persisted slots.
///
/// Store operations never return these as `Err`; they ride along in an
/// [`Outcome`] next to the degraded value.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read slot '{slot}': {source}")]
    Read {
        slot: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("slot '{slot}' holds undecodable data: {source}")]
    Decode {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode slot '{slot}': {source}")]
    Encode {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write slot '{slot}': {source}")]
    Write {
        slot: &'static str,
        #[source]
        source: StorageError,
    },
}

impl StoreError {
    pub fn slot(&self) -> &'static str {
        match self {
            StoreError::Read { slot, .. }
            | StoreError::Decode { slot, .. }
            | StoreError::Encode { slot, .. }
            | StoreError::Write { slot, .. } => slot,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, StoreError::Read { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Decode { .. })
    }

    pub fn is_write(&self) -> bool {
        matches!(self, StoreError::Write { .. } | StoreError::Encode { .. })
    }
}

/// A value that is always usable, plus the fault it degraded from, if any.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub error: Option<StoreError>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn degraded(value: T, error: StoreError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            error: self.error,
        }
    }
}

/// Caller mistakes at the library level, distinct from storage faults.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no catalog item with id '{0}'")]
    UnknownItem(String),
}
