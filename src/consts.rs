//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Endpoint the `#hello` control calls.
pub const HELLO_PATH: &str = "/service/manage/other/hello";

/// Endpoint the `#wait` control calls.
pub const WAIT_PATH: &str = "/service/manage/other/wait";

/// Selector of the control bound to [`HELLO_PATH`].
pub const HELLO_SELECTOR: &str = "#hello";

/// Selector of the control bound to [`WAIT_PATH`].
pub const WAIT_SELECTOR: &str = "#wait";

/// Logged before a successful payload.
pub const DONE_MARKER: &str = "done";

/// Logged when the wait request fails or times out.
pub const FAIL_MARKER: &str = "fail";

/// Client-side timeout for the wait request.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);

/// How long the service holds a wait request before answering.
pub const DEFAULT_WAIT_DELAY: Duration = Duration::from_secs(3);

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "public_html";

/// Prefix `#` when missing so `wait` and `#wait` name the same control.
pub fn normalize_selector(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    }
}
