//! Elapsed time formatting

/// Format whole seconds as `M:SS`.
///
/// Minutes are unpadded and unbounded, so an hour reads `60:00`.
pub fn formatted_seconds(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_seconds() {
        assert_eq!(formatted_seconds(0), "0:00");
        assert_eq!(formatted_seconds(5), "0:05");
        assert_eq!(formatted_seconds(59), "0:59");
        assert_eq!(formatted_seconds(60), "1:00");
        assert_eq!(formatted_seconds(125), "2:05");
        assert_eq!(formatted_seconds(3600), "60:00");
        assert_eq!(formatted_seconds(6039), "100:39");
    }

    #[test]
    fn test_matches_minutes_and_padded_seconds() {
        for s in (0..7_300).step_by(7) {
            let expected = format!("{}:{}{}", s / 60, if s % 60 < 10 { "0" } else { "" }, s % 60);
            assert_eq!(formatted_seconds(s), expected);
        }
    }
}
