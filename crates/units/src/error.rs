use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("Unit field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Unit field '{field}' contains a line break: {value:?}")]
    Multiline { field: &'static str, value: String },
}
