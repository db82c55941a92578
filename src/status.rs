use std::error::Error as StdError;
use std::fmt;

use crate::code::Code;
use crate::detail::ErrorDetail;
use crate::error::CodecError;
use crate::metadata::Metadata;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// An RPC failure: a status code, an optional wrapped cause, structured
/// details, and metadata.
///
/// The owner fills in details and metadata before handing the error to a
/// transport; after that it should be treated as read-only.
///
/// `Error` has no value equality. Use [`error_is`] to test whether a chain
/// contains a particular instance; two errors built from the same code and an
/// equal cause are distinct.
#[derive(Debug)]
pub struct Error {
    code: Code,
    cause: Option<Cause>,
    details: Vec<ErrorDetail>,
    meta: Metadata,
    wire: bool,
}

impl Error {
    /// Wraps `cause` under `code`.
    ///
    /// Strings are accepted as causes, so `Error::new(Code::NotFound, "no such user")`
    /// works without a dedicated error type.
    pub fn new(code: Code, cause: impl Into<Cause>) -> Self {
        Self {
            code,
            cause: Some(cause.into()),
            details: Vec::new(),
            meta: Metadata::new(),
            wire: false,
        }
    }

    /// An error with no cause; its message is empty.
    pub fn from_code(code: Code) -> Self {
        Self {
            code,
            cause: None,
            details: Vec::new(),
            meta: Metadata::new(),
            wire: false,
        }
    }

    pub fn with_message(code: Code, message: impl Into<String>) -> Self {
        Self::new(code, message.into())
    }

    /// An error that arrived from a peer rather than being raised locally.
    pub fn new_wire(code: Code, cause: impl Into<Cause>) -> Self {
        Self::new(code, cause).into_wire()
    }

    pub(crate) fn into_wire(mut self) -> Self {
        self.wire = true;
        self
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// The cause's message, or `""` without one.
    pub fn message(&self) -> String {
        self.cause
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    pub fn add_detail(&mut self, detail: ErrorDetail) {
        self.details.push(detail);
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }

    pub fn is_wire(&self) -> bool {
        self.wire
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();
        if message.is_empty() {
            f.write_str(self.code.as_str())
        } else {
            write!(f, "{}: {message}", self.code)
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Self::new(Code::Internal, err)
    }
}

/// `err` followed by each successive [`source`](StdError::source).
pub fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

/// The first [`Error`] in `err`'s chain.
pub fn as_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    chain(err).find_map(|e| e.downcast_ref::<Error>())
}

/// Classifies any error for transmission.
///
/// Returns the code of the first [`Error`] in the chain, or [`Code::Unknown`]
/// when the chain holds none.
pub fn code_of(err: &(dyn StdError + 'static)) -> Code {
    as_error(err).map_or(Code::Unknown, Error::code)
}

/// Whether `target` is the very instance found somewhere in `err`'s chain.
pub fn error_is(err: &(dyn StdError + 'static), target: &Error) -> bool {
    chain(err).any(|e| {
        e.downcast_ref::<Error>()
            .is_some_and(|e| std::ptr::eq(e, target))
    })
}

pub fn is_wire_error(err: &(dyn StdError + 'static)) -> bool {
    as_error(err).is_some_and(Error::is_wire)
}

/// Returns `err` unchanged if it already is an [`Error`].
///
/// An error whose chain holds an [`Error`] is wrapped under that error's
/// code; anything else is wrapped under [`Code::Unknown`].
pub fn wrap_if_uncoded(err: Cause) -> Error {
    match err.downcast::<Error>() {
        Ok(err) => *err,
        Err(other) => {
            let code = as_error(&*other).map_or(Code::Unknown, Error::code);
            Error::new(code, other)
        }
    }
}
