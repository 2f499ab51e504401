//! リクエストエンコードのプロパティテスト

use localsock_http11::Request;
use pbt::{body_bytes, http_method, request_target};
use proptest::prelude::*;

/// エンコード結果から先頭行を取り出す
fn first_line(encoded: &[u8]) -> &[u8] {
    let pos = encoded
        .windows(2)
        .position(|w| w == b"\r\n")
        .expect("encoded request has no CRLF");
    &encoded[..pos]
}

/// エンコード結果からヘッダーブロック終端以降のボディを取り出す
fn body_part(encoded: &[u8]) -> &[u8] {
    let pos = encoded
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("encoded request has no header terminator");
    &encoded[pos + 4..]
}

// エンコードした先頭行を再パースすると同じメソッドとターゲットに戻る
proptest! {
    #[test]
    fn prop_request_line_round_trip(method in http_method(), target in request_target()) {
        let request = Request::new(&method, &target).header("Host", "localhost");
        let encoded = request.encode();

        let line = String::from_utf8(first_line(&encoded).to_vec()).unwrap();
        let parts: Vec<&str> = line.splitn(3, ' ').collect();

        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0], method.as_str());
        prop_assert_eq!(parts[1], target.as_str());
        prop_assert_eq!(parts[2], "HTTP/1.1");
    }
}

// ボディ付きリクエストの Content-Length はボディの正確なバイト長
proptest! {
    #[test]
    fn prop_content_length_is_exact(target in request_target(), body in body_bytes()) {
        prop_assume!(!body.is_empty());

        let request = Request::new("POST", &target)
            .header("Host", "localhost")
            .body(body.clone());
        let encoded = request.encode();

        let text = String::from_utf8_lossy(&encoded);
        let expected = format!("Content-Length: {}\r\n", body.len());
        prop_assert!(text.contains(&expected));
    }
}

// ヘッダーブロックの後に続くバイト列はボディと一致する
proptest! {
    #[test]
    fn prop_body_bytes_follow_headers(method in http_method(), body in body_bytes()) {
        let request = Request::new(&method, "/1.0")
            .header("Host", "localhost")
            .body(body.clone());
        let encoded = request.encode();

        prop_assert_eq!(body_part(&encoded), body.as_slice());
    }
}

// ボディなしのリクエストは空行で終わり Content-Length を持たない
proptest! {
    #[test]
    fn prop_no_body_no_content_length(method in http_method(), target in request_target()) {
        let request = Request::new(&method, &target).header("Host", "localhost");
        let encoded = request.encode();

        let text = String::from_utf8_lossy(&encoded);
        prop_assert!(!text.contains("Content-Length"));
        prop_assert!(text.ends_with("\r\n\r\n"));
    }
}
