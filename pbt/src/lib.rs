//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// リクエスト生成
// ========================================

/// HTTP メソッド
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
    ]
}

/// パス用文字 (RFC 3986 pchar の一部 + "/")
fn target_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('.'),
        Just('_'),
        Just('~'),
        Just('/'),
        Just('='),
        Just('&'),
        Just('?'),
    ]
}

/// リクエストターゲット (パス + クエリ、origin-form)
pub fn request_target() -> impl Strategy<Value = String> {
    proptest::collection::vec(target_char(), 0..32)
        .prop_map(|chars| format!("/{}", chars.into_iter().collect::<String>()))
}

/// 任意のボディ
pub fn body_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..512)
}

// ========================================
// レスポンス生成
// ========================================

/// chunked ボディの各チャンク (1 バイト以上)
pub fn chunks() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..64), 1..8)
}
