//! Wire-format constants: the static start page, the fragments of the
//! composed form-response page, and the form field names.

/// Complete response to a `GET`: status line, headers, and the form page.
/// `Content-Length` covers the body from `<html>` through the final blank line.
pub const START_PAGE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: text/html\r\n\
Content-Length: 297\r\n\r\n\
<html>\r\n\
<head>\r\n\
<title>Web Display</title></head><body>\r\n\
<form method=\"post\">\r\n  \
Text to display:<br>\r\n  \
<input type=\"text\" name=\"text\" value=\"\"><br>\r\n  \
Password:<br>\r\n  \
<input type=\"password\" name=\"password\" value=\"\"><br><br>\r\n  \
<input type=\"submit\" value=\"Submit\">\r\n\
</form>\r\n\
</body>\r\n\
</html>\r\n\
\r\n";

// ---------------------------------------------------------------------------
// Composed response (POST)
// ---------------------------------------------------------------------------

/// Status code sent for every form submission, regardless of outcome.
pub const POST_STATUS_CODE: u16 = 400;

pub const STATUS_LINE_PREFIX: &[u8] = b"HTTP/1.1 ";
pub const STATUS_LINE_SUFFIX: &[u8] = b" OK\r\n";
pub const CONTENT_TYPE_HEADER: &[u8] = b"Content-Type: text/html\r\n";
pub const CONTENT_LENGTH_NAME: &[u8] = b"Content-Length: ";
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Opening of the response page, up to and including the submit button.
pub const RESPONSE_TOP: &[u8] = b"<html>\r\n\
<head>\r\n\
<title>Web Display</title></head><body>\r\n\
<form method=\"post\">\r\n  \
Text to display:<br>\r\n  \
<input type=\"text\" name=\"text\" value=\"\"><br>\r\n  \
Password:<br>\r\n  \
<input type=\"password\" name=\"password\" value=\"\"><br><br>\r\n  \
<input type=\"submit\" value=\"Submit\"><br><br>\r\n";

pub const RESPONSE_BOTTOM: &[u8] = b"</form>\r\n\
</body>\r\n\
</html>\r\n\
\r\n";

pub const STATUS_LABEL: &[u8] = b"Status: ";
pub const STATUS_NO_TEXT: &[u8] = b"text field must be non-empty";
pub const STATUS_NO_PASSWORD: &[u8] = b"password field must be non-empty";
pub const STATUS_WRONG_PASSWORD: &[u8] = b"wrong password";
pub const STATUS_TEXT_SET: &[u8] = b"text set to: ";

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

pub const TEXT_FIELD: &[u8] = b"text=";
pub const PASSWORD_FIELD: &[u8] = b"password=";

/// Longest echoed `text` value; anything beyond is dropped.
pub const MAX_ECHO_LEN: usize = 256;
