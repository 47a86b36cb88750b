use aws_smithy_types::error::display::DisplayErrorContext;
use snafu::Snafu;

/// The result type returned by the client traits.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The error type returned by the client traits. Conditions the tools expect, such as a missing
/// role or cluster, are not errors; they are part of the successful return value.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// The provider rejected or failed the call. `message` is the full provider error text.
    #[snafu(display("{} failed: {}", operation, message))]
    Request {
        operation: &'static str,
        message: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[snafu(display("{} was missing from the {} response", what, operation))]
    MissingField {
        operation: &'static str,
        what: &'static str,
    },
}

impl ClientError {
    pub fn request<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Request {
            operation,
            message: DisplayErrorContext(&source).to_string(),
            source: Box::new(source),
        }
    }

    pub fn missing(operation: &'static str, what: &'static str) -> Self {
        Self::MissingField { operation, what }
    }
}
