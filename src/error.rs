use snafu::Snafu;

use crate::client::Error as ClientError;

/// Errors surfaced by [`Summarizer`](crate::Summarizer) and the normalizer.
///
/// `Display` is meant for logs. Use [`Error::user_message`] for text shown to
/// end users; it never contains raw model output or transport details.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The location was empty or whitespace only
    #[snafu(display("location must not be empty"))]
    InvalidInput,

    /// The call to the AI service failed (network, auth, quota, bad status)
    #[snafu(display("summary service unavailable"))]
    ServiceUnavailable { source: ClientError },

    /// The reply did not contain a JSON object
    #[snafu(display("synthesis failed: reply contained no JSON object"))]
    SynthesisFailed,

    /// The reply contained something shaped like JSON that did not parse
    #[snafu(display("response was malformed"))]
    MalformedResponse { source: serde_json::Error },
}

impl Error {
    /// True for both kinds of "could not understand the reply" failures
    pub fn is_unparsable(&self) -> bool {
        matches!(
            self,
            Error::SynthesisFailed | Error::MalformedResponse { .. }
        )
    }

    /// Message suitable for showing to the person who asked for the summary
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::InvalidInput => "Abeg, enter a location first.",
            Error::ServiceUnavailable { .. } => {
                "AmeboAI don go market, e never come back. Check your network or try again later."
            }
            Error::SynthesisFailed | Error::MalformedResponse { .. } => {
                "AmeboAI drink small stout, e talk no clear again. Try again!"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed() -> Error {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        Error::MalformedResponse { source }
    }

    #[test]
    fn unparsable_groups_both_parse_failures() {
        assert!(Error::SynthesisFailed.is_unparsable());
        assert!(malformed().is_unparsable());
        assert!(!Error::InvalidInput.is_unparsable());
    }

    #[test]
    fn parse_failures_share_a_user_message() {
        assert_eq!(
            Error::SynthesisFailed.user_message(),
            malformed().user_message()
        );
        assert_ne!(
            Error::SynthesisFailed.user_message(),
            Error::InvalidInput.user_message()
        );
    }

    #[test]
    fn service_failure_suggests_retry() {
        let err = Error::ServiceUnavailable {
            source: ClientError::BadResponse {
                code: 503,
                description: None,
            },
        };
        assert!(err.user_message().contains("try again"));
    }
}
