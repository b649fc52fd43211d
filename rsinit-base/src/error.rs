// Every fallible operation in the workspace returns this Error. We want:
// 1. A backtrace captured where the error is created or first crosses into our code
// 2. One place to set a breakpoint that traps every error fairly soon after it's made
// 3. Same but for emitting the error into the tracing system
// 4. A readable one-line message for the operator when the process exits non-zero

use std::borrow::Cow;
use backtrace_error::DynBacktraceError;
use tracing::error;

pub struct Error {
    msg: String,
    inner: DynBacktraceError,
}
pub type Result<T> = std::result::Result<T, Error>;

struct SimpleErr(Cow<'static, str>);
impl std::fmt::Debug for SimpleErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for SimpleErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for SimpleErr {}

impl<E: std::error::Error + Send + Sync + 'static> From<E> for Error {
    fn from(err: E) -> Error {
        Error::new(err)
    }
}

impl Error {
    pub fn new<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
        error!(target: "rsinit", "{:?}", err);
        let msg = err.to_string();
        Error {
            msg,
            inner: DynBacktraceError::from(err),
        }
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

// Debug carries the backtrace; Display is the short form shown to operators.
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

pub fn err(msg: impl Into<Cow<'static, str>>) -> Error {
    let err = SimpleErr(msg.into());
    Error::new(err)
}
