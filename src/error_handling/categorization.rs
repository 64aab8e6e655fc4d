//! Error categorization.
//!
//! Maps transport-level failures onto `ErrorType` so both components tag their
//! log lines the same way.

use super::types::ErrorType;

/// Tags a transport failure for logging.
///
/// Status errors never reach here: neither component calls
/// `error_for_status`, both inspect the status themselves.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}
