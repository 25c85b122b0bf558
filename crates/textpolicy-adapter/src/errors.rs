use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdapterError {
    #[error("invalid policy, text cannot be empty")]
    EmptyInput,
    #[error("{0} is not implemented by the text adapter")]
    NotImplemented(&'static str),
}

pub type AdapterResult<T> = Result<T, AdapterError>;

impl From<AdapterError> for casbin::Error {
    fn from(err: AdapterError) -> Self {
        casbin::Error::AdapterError(casbin::error::AdapterError(Box::new(err)))
    }
}
