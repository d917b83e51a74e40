//! Reconnect policy for the client.
//!
//! Pure functions without side effects, kept apart from the session so they
//! are easy to test.

use crate::error::ClientError;

/// Maximum number of connection attempts before giving up.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
/// Seconds to wait between connection attempts.
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidUrl), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Number of consecutive failed attempts after a session ended with `error`.
///
/// A dropped connection that had loaded the board starts a fresh count, so
/// the limit applies to failures since the last live session.
pub fn next_failed_attempts(error: &ClientError, failed_attempts: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 0,
        _ => failed_attempts + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_invalid_url() {
        // テスト項目: InvalidUrl エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::InvalidUrl("http://example.com".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_lost() {
        // テスト項目: ConnectionLost の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionLost("reset by peer".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_invalid_url() {
        // テスト項目: InvalidUrl エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::InvalidUrl("not a url".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("connection refused".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("connection refused".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_next_failed_attempts_counts_failed_connects() {
        // テスト項目: 接続に失敗するたびに失敗回数が増える
        // given (前提条件):
        let error = ClientError::ConnectionError("connection refused".to_string());

        // when (操作):
        let result = next_failed_attempts(&error, 2);

        // then (期待する結果):
        assert_eq!(result, 3);
    }

    #[test]
    fn test_next_failed_attempts_resets_after_live_session() {
        // テスト項目: replay 済みの接続が切れた場合は失敗回数がリセットされ、再接続が許可される
        // given (前提条件): 上限直前まで失敗した後に接続に成功し、その接続が切れた
        let error = ClientError::ConnectionLost("reset by peer".to_string());

        // when (操作):
        let result = next_failed_attempts(&error, MAX_RECONNECT_ATTEMPTS - 1);

        // then (期待する結果):
        assert_eq!(result, 0);
        assert!(should_attempt_reconnect(&error, result, MAX_RECONNECT_ATTEMPTS));
    }
}
