pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout direction: {value}")]
    UnknownDirection { value: String },

    #[error("unknown density level: {value}")]
    UnknownDensity { value: String },

    #[error("unknown layout strategy: {value}")]
    UnknownStrategy { value: String },

    #[error("invalid spacing value: {value}")]
    InvalidSpacing { value: String },
}
