//! ステータスコード分類のプロパティテスト

use localsock_http11::ReplyError;
use proptest::prelude::*;

// 400 未満はエラーなし
proptest! {
    #[test]
    fn prop_under_400_is_not_an_error(code in 100u16..400) {
        prop_assert_eq!(ReplyError::from_status_code(code), None);
    }
}

// 100-599 の全域で定義され、決定的である
proptest! {
    #[test]
    fn prop_total_and_deterministic(code in 100u16..=599) {
        let first = ReplyError::from_status_code(code);
        let second = ReplyError::from_status_code(code);
        prop_assert_eq!(first, second);

        if code >= 400 {
            prop_assert!(first.is_some());
        } else {
            prop_assert!(first.is_none());
        }
    }
}

// 501-599 は UnknownServerError
proptest! {
    #[test]
    fn prop_server_errors(code in 501u16..=599) {
        prop_assert_eq!(
            ReplyError::from_status_code(code),
            Some(ReplyError::UnknownServerError)
        );
    }
}

// 対応表にない 4xx は UnknownContentError
proptest! {
    #[test]
    fn prop_other_content_errors(code in 400u16..=499) {
        prop_assume!(!matches!(code, 400 | 401 | 403 | 404 | 409));
        prop_assert_eq!(
            ReplyError::from_status_code(code),
            Some(ReplyError::UnknownContentError)
        );
    }
}

// 対応表の個別エントリー
#[test]
fn classification_table() {
    assert_eq!(
        ReplyError::from_status_code(400),
        Some(ReplyError::InvalidOperation)
    );
    assert_eq!(
        ReplyError::from_status_code(401),
        Some(ReplyError::AuthenticationRequired)
    );
    assert_eq!(
        ReplyError::from_status_code(403),
        Some(ReplyError::AccessDenied)
    );
    assert_eq!(
        ReplyError::from_status_code(404),
        Some(ReplyError::NotFound)
    );
    assert_eq!(
        ReplyError::from_status_code(409),
        Some(ReplyError::Conflict)
    );
    assert_eq!(
        ReplyError::from_status_code(500),
        Some(ReplyError::InternalServerError)
    );
    assert_eq!(
        ReplyError::from_status_code(501),
        Some(ReplyError::UnknownServerError)
    );
    assert_eq!(
        ReplyError::from_status_code(402),
        Some(ReplyError::UnknownContentError)
    );
    assert_eq!(ReplyError::from_status_code(200), None);
    assert_eq!(ReplyError::from_status_code(399), None);
}
