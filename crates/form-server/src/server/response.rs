//! Response composition for one received request.
//!
//! A `GET` gets the static start page. A `POST` gets a page assembled from
//! fragments: the body fragments are listed first so their total length can
//! be rendered into the `Content-Length` header, then the header and body
//! fragments are joined into a single buffer allocated at its final size.

use common::protocol::{
    CONTENT_LENGTH_NAME, CONTENT_TYPE_HEADER, HEADER_TERMINATOR, MAX_ECHO_LEN, PASSWORD_FIELD,
    POST_STATUS_CODE, RESPONSE_BOTTOM, RESPONSE_TOP, START_PAGE, STATUS_LABEL,
    STATUS_LINE_PREFIX, STATUS_LINE_SUFFIX, STATUS_NO_PASSWORD, STATUS_NO_TEXT, STATUS_TEXT_SET,
    STATUS_WRONG_PASSWORD, TEXT_FIELD,
};
use common::{classify, find_param, Classification, FragmentError, FragmentList, ScratchBuf};
use tracing::debug;

use super::state::Credentials;

/// Furthest a field value is scanned past its name.
pub const MAX_FIELD_SCAN: usize = 1024;

/// Upper bound on the number of body fragments: top, label, message, echo, bottom.
const BODY_FRAGMENTS: usize = 5;
/// Header fragments plus body fragments.
const RESPONSE_FRAGMENTS: usize = 7 + BODY_FRAGMENTS;

/// What to send back for one received buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// The static start page. The connection ends once it is written.
    StartPage,
    /// A composed form-result page, sized exactly to its contents.
    Composed(Vec<u8>),
    /// Nothing is written for this read.
    Silent,
}

impl Reply {
    /// Bytes to write, or `None` for [`Reply::Silent`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Reply::StartPage => Some(START_PAGE),
            Reply::Composed(bytes) => Some(bytes.as_slice()),
            Reply::Silent => None,
        }
    }

    /// Whether the connection is closed after this reply is written.
    pub fn ends_connection(&self) -> bool {
        matches!(self, Reply::StartPage)
    }
}

/// Result of checking a submitted form body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome<'a> {
    MissingText,
    MissingPassword,
    WrongPassword,
    /// Password matched; `text` is the submitted value, already truncated to
    /// [`MAX_ECHO_LEN`] bytes.
    Accepted { text: &'a [u8] },
}

impl FormOutcome<'_> {
    /// Short label for log events. Never includes submitted values.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormOutcome::MissingText => "missing_text",
            FormOutcome::MissingPassword => "missing_password",
            FormOutcome::WrongPassword => "wrong_password",
            FormOutcome::Accepted { .. } => "accepted",
        }
    }
}

/// Decide the reply for a raw received buffer.
///
/// # Errors
///
/// Returns a [`FragmentError`] if the composed page does not fit its fragment
/// list, which would mean the fragment budget above is wrong.
pub fn respond(raw: &[u8], credentials: &Credentials) -> Result<Reply, FragmentError> {
    match classify(raw) {
        Classification::Get => Ok(Reply::StartPage),
        Classification::Post {
            body_offset: Some(offset),
        } => {
            let outcome = evaluate(&raw[offset..], credentials);
            debug!(outcome = outcome.as_str(), "form submission checked");
            compose(outcome).map(Reply::Composed)
        }
        Classification::Post { body_offset: None } | Classification::Unrecognized => Ok(Reply::Silent),
    }
}

/// Check the `text` and `password` fields of a form body.
///
/// Empty fields count as missing. `text` is checked before `password`.
pub fn evaluate<'a>(body: &'a [u8], credentials: &Credentials) -> FormOutcome<'a> {
    let Some(text) = find_param(body, TEXT_FIELD, MAX_FIELD_SCAN).supplied(body) else {
        return FormOutcome::MissingText;
    };
    let Some(password) = find_param(body, PASSWORD_FIELD, MAX_FIELD_SCAN).supplied(body) else {
        return FormOutcome::MissingPassword;
    };
    if !credentials.matches(password) {
        return FormOutcome::WrongPassword;
    }
    FormOutcome::Accepted {
        text: &text[..text.len().min(MAX_ECHO_LEN)],
    }
}

/// Build the full HTTP response for a form outcome.
///
/// `Content-Length` covers the body fragments only, from `<html>` through
/// the closing blank line.
pub fn compose(outcome: FormOutcome<'_>) -> Result<Vec<u8>, FragmentError> {
    let mut body = FragmentList::<BODY_FRAGMENTS>::new();
    body.push(RESPONSE_TOP)?;
    body.push(STATUS_LABEL)?;
    match outcome {
        FormOutcome::MissingText => body.push(STATUS_NO_TEXT)?,
        FormOutcome::MissingPassword => body.push(STATUS_NO_PASSWORD)?,
        FormOutcome::WrongPassword => body.push(STATUS_WRONG_PASSWORD)?,
        FormOutcome::Accepted { text } => {
            body.push(STATUS_TEXT_SET)?;
            body.push(text)?;
        }
    }
    body.push(RESPONSE_BOTTOM)?;

    // First pass: the header value depends on fragments that come after it.
    let status = ScratchBuf::<5>::display(POST_STATUS_CODE);
    let content_length = ScratchBuf::<20>::display(body.total_length());

    // Second pass: full fragment list, joined into one exact-size buffer.
    let mut response = FragmentList::<RESPONSE_FRAGMENTS>::new();
    response.extend_from(&[
        STATUS_LINE_PREFIX,
        status.as_bytes(),
        STATUS_LINE_SUFFIX,
        CONTENT_TYPE_HEADER,
        CONTENT_LENGTH_NAME,
        content_length.as_bytes(),
        HEADER_TERMINATOR,
    ])?;
    response.extend_from(body.as_slice())?;

    Ok(response.join())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::request::find_subslice;

    const SECRET: &str = "letmein";

    fn creds() -> Credentials {
        Credentials::new(SECRET)
    }

    fn post(body: &str) -> Vec<u8> {
        format!("POST / HTTP/1.1\r\nHost: display\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\n{body}")
            .into_bytes()
    }

    fn composed(raw: &[u8]) -> Vec<u8> {
        match respond(raw, &creds()).unwrap() {
            Reply::Composed(bytes) => bytes,
            other => panic!("expected composed reply, got {other:?}"),
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        find_subslice(haystack, needle.as_bytes()).is_some()
    }

    /// Split a response into the declared `Content-Length` and the body bytes.
    fn declared_and_body(resp: &[u8]) -> (usize, &[u8]) {
        let sep = find_subslice(resp, b"\r\n\r\n").unwrap() + 4;
        let name = b"Content-Length: ";
        let start = find_subslice(resp, name).unwrap() + name.len();
        let end = start + find_subslice(&resp[start..], b"\r\n").unwrap();
        let declared = std::str::from_utf8(&resp[start..end]).unwrap().parse().unwrap();
        (declared, &resp[sep..])
    }

    #[test]
    fn get_gets_start_page() {
        let reply = respond(b"GET / HTTP/1.1\r\n\r\n", &creds()).unwrap();
        assert_eq!(reply, Reply::StartPage);
        assert!(reply.ends_connection());
        assert!(reply.as_bytes().unwrap().starts_with(b"HTTP/1.1 200 OK"));
    }

    #[test]
    fn unrecognized_is_silent() {
        let reply = respond(b"hello world", &creds()).unwrap();
        assert_eq!(reply, Reply::Silent);
        assert_eq!(reply.as_bytes(), None);
    }

    #[test]
    fn post_without_separator_is_silent() {
        let reply = respond(b"POST / HTTP/1.1\r\nHost: x\r\n", &creds()).unwrap();
        assert_eq!(reply, Reply::Silent);
    }

    #[test]
    fn empty_text_reported() {
        let resp = composed(&post("text=&password=abc"));
        assert!(contains(&resp, "Status: text field must be non-empty"));
    }

    #[test]
    fn missing_password_reported() {
        let resp = composed(&post("text=hello"));
        assert!(contains(&resp, "password field must be non-empty"));
        let resp = composed(&post("text=hello&password="));
        assert!(contains(&resp, "password field must be non-empty"));
    }

    #[test]
    fn wrong_password_reported() {
        let resp = composed(&post("text=hello&password=wrong"));
        assert!(contains(&resp, "wrong password"));
        assert!(!contains(&resp, "text set to"));
    }

    #[test]
    fn text_is_checked_before_password() {
        assert_eq!(evaluate(b"password=", &creds()), FormOutcome::MissingText);
        assert_eq!(evaluate(b"text=&password=letmein", &creds()), FormOutcome::MissingText);
        assert_eq!(evaluate(b"password=letmein&text=", &creds()), FormOutcome::MissingText);
        assert_eq!(evaluate(b"text=a&password=", &creds()), FormOutcome::MissingPassword);
    }

    #[test]
    fn prefix_and_suffix_passwords_rejected() {
        assert_eq!(evaluate(b"text=a&password=letme", &creds()), FormOutcome::WrongPassword);
        assert_eq!(evaluate(b"text=a&password=letmein2", &creds()), FormOutcome::WrongPassword);
    }

    #[test]
    fn correct_password_echoes_text() {
        let resp = composed(&post(&format!("text=hello&password={SECRET}")));
        assert!(contains(&resp, "Status: text set to: hello"));

        let (declared, body) = declared_and_body(&resp);
        assert!(body.starts_with(b"<html>"));
        assert!(body.ends_with(b"</html>\r\n\r\n"));
        assert_eq!(declared, body.len());
    }

    #[test]
    fn content_length_accurate_for_every_outcome() {
        for body in ["text=&password=x", "text=a", "text=a&password=nope", "password=letmein&text=a"] {
            let resp = composed(&post(body));
            let (declared, page) = declared_and_body(&resp);
            assert_eq!(declared, page.len(), "body {body:?}");
        }
    }

    #[test]
    fn status_code_is_400_for_every_outcome() {
        for body in ["text=", "text=a", "text=a&password=nope", "text=a&password=letmein"] {
            assert!(composed(&post(body)).starts_with(b"HTTP/1.1 400 OK\r\n"), "body {body:?}");
        }
    }

    #[test]
    fn echo_is_truncated() {
        let long = "x".repeat(MAX_ECHO_LEN + 50);
        let body = format!("password={SECRET}&text={long}");
        let FormOutcome::Accepted { text } = evaluate(body.as_bytes(), &creds()) else {
            panic!("expected accepted outcome");
        };
        assert_eq!(text.len(), MAX_ECHO_LEN);
    }

    #[test]
    fn text_is_echoed_verbatim() {
        let body = format!("text=a+b%21&password={SECRET}");
        assert_eq!(
            evaluate(body.as_bytes(), &creds()),
            FormOutcome::Accepted { text: b"a+b%21" }
        );
    }

    #[test]
    fn identical_submissions_identical_responses() {
        let raw = post(&format!("text=hello&password={SECRET}"));
        assert_eq!(composed(&raw), composed(&raw));
    }

    #[test]
    fn outcome_labels_omit_values() {
        let outcome = FormOutcome::Accepted { text: b"private" };
        assert_eq!(outcome.as_str(), "accepted");
    }
}
