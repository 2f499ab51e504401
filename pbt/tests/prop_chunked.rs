//! Chunked ボディ再組み立てのプロパティテスト
//!
//! チャンク数・チャンク境界・受信通知の分割位置によらず、
//! 再組み立て結果が元のペイロードとバイト単位で一致することを確認する。

use localsock_http11::{Reply, ReplyState, encode_chunks};
use pbt::chunks;
use proptest::prelude::*;

/// chunked レスポンス 1 件分のワイヤーデータを組み立てる
fn chunked_wire(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut wire = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
    let refs: Vec<&[u8]> = chunks.iter().map(|c| c.as_slice()).collect();
    wire.extend_from_slice(&encode_chunks(&refs));
    wire
}

/// ワイヤーデータを分割位置のリストに従って断片へ切り分ける
fn split_at_points(wire: &[u8], points: &[prop::sample::Index]) -> Vec<Vec<u8>> {
    let mut cuts: Vec<usize> = points.iter().map(|p| p.index(wire.len())).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut fragments = Vec::new();
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            fragments.push(wire[start..cut].to_vec());
            start = cut;
        }
    }
    fragments.push(wire[start..].to_vec());
    fragments
}

// 一括で投入した場合の再組み立て
proptest! {
    #[test]
    fn prop_reassembly_matches_payload(chunks in chunks()) {
        let payload: Vec<u8> = chunks.concat();
        let wire = chunked_wire(&chunks);

        let mut reply = Reply::new();
        reply.on_data(&wire).unwrap();

        prop_assert_eq!(reply.state(), ReplyState::Finished);
        prop_assert!(reply.is_chunked());
        prop_assert_eq!(reply.body(), payload.as_slice());
    }
}

// 受信通知を何回に分割しても結果は一括投入と同一
proptest! {
    #[test]
    fn prop_fragmentation_is_invisible(
        chunks in chunks(),
        points in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let payload: Vec<u8> = chunks.concat();
        let wire = chunked_wire(&chunks);

        let mut reply = Reply::new();
        for fragment in split_at_points(&wire, &points) {
            reply.on_data(&fragment).unwrap();
        }

        prop_assert_eq!(reply.state(), ReplyState::Finished);
        prop_assert_eq!(reply.body(), payload.as_slice());
    }
}

// 1 バイトずつ投入しても結果は変わらない
proptest! {
    #[test]
    fn prop_byte_at_a_time(chunks in chunks()) {
        let payload: Vec<u8> = chunks.concat();
        let wire = chunked_wire(&chunks);

        let mut reply = Reply::new();
        for byte in &wire {
            reply.on_data(std::slice::from_ref(byte)).unwrap();
        }

        prop_assert_eq!(reply.state(), ReplyState::Finished);
        prop_assert_eq!(reply.body(), payload.as_slice());
    }
}
