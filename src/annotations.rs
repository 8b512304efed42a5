//! GitHub Actions workflow command formatting

/// `::notice title=<title>::<message>`
pub fn notice(title: &str, message: &str) -> String {
    format!("::notice title={title}::{}", escape(message))
}

/// `::notice::<message>`
pub fn notice_untitled(message: &str) -> String {
    format!("::notice::{}", escape(message))
}

/// `::error::<message>`
pub fn error(message: &str) -> String {
    format!("::error::{}", escape(message))
}

// Workflow commands are line-oriented; message data must percent-encode
// `%`, CR and LF.
fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_with_title() {
        assert_eq!(
            notice("PR mode", "Adding plugins touched in this PR to matrix"),
            "::notice title=PR mode::Adding plugins touched in this PR to matrix"
        );
    }

    #[test]
    fn test_error_escapes_newlines() {
        assert_eq!(error("first\nsecond"), "::error::first%0Asecond");
    }
}
