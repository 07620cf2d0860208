use anyhow::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Parse,        // Response body did not match the expected JSON
    Other,
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    // Typed checks first: reqwest knows more than the message does
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = reqwest_err.status() {
                return classify_status(status.as_u16());
            }
            if reqwest_err.is_decode() {
                return ErrorType::Parse;
            }
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return ErrorType::Parse;
        }
    }

    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    // Non-2xx answers come back as "API error (404 Not Found): ..."
    if let Some(code) = error_msg
        .find("api error (")
        .and_then(|pos| error_msg.get(pos + "api error (".len()..pos + "api error (".len() + 3))
        .and_then(|code| code.parse::<u16>().ok())
    {
        return classify_status(code);
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

fn classify_status(code: u16) -> ErrorType {
    match code {
        404 => ErrorType::NotFound,
        500..=599 => ErrorType::ServerError,
        _ => ErrorType::Other,
    }
}

/// Format error message for tech-savvy audience - show raw error details
pub fn format_error_message(error: &Error) -> String {
    // Walk the error chain to find reqwest::Error (most informative for network errors)
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
    }

    // Otherwise the root cause is the most specific message
    error.root_cause().to_string()
}

/// One-line description of a failed request
pub fn describe_failure(action: &str, error: &Error) -> String {
    let hint = match classify_error(error) {
        ErrorType::ConnectionRefused => " (is the server running?)",
        ErrorType::Timeout => " (request timed out)",
        ErrorType::NotFound => " (endpoint not found)",
        _ => "",
    };
    format!("{} failed: {}{}", action, format_error_message(error), hint)
}
