use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("unknown customer id '{0}'")]
    UnknownCustomer(String),
}
