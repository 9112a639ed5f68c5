//! Integration tests for the matsum-core protocol codec.
//!
//! These tests exercise the codec through the public API only, driving both
//! directions of the protocol across an in-memory duplex stream the way the
//! client and server use the real socket: one end writes frames, the other
//! decodes them one at a time, and stream alignment has to hold across
//! back-to-back frames.

use matsum_core::{
    read_request, read_response, write_request, write_response, CodecError, Matrix, Request,
    Response, WORD_SIZE,
};

/// Encodes a request, decodes it back, and checks that no byte is left over.
async fn request_roundtrip(request: Request) -> Request {
    let mut buf = Vec::new();
    write_request(&mut buf, &request).await.expect("encode must succeed");
    let mut reader = buf.as_slice();
    let decoded = read_request(&mut reader).await.expect("decode must succeed");
    assert!(reader.is_empty(), "all bytes must be consumed");
    decoded
}

async fn response_roundtrip(response: Response) -> Response {
    let mut buf = Vec::new();
    write_response(&mut buf, &response)
        .await
        .expect("encode must succeed");
    let mut reader = buf.as_slice();
    let decoded = read_response(&mut reader).await.expect("decode must succeed");
    assert!(reader.is_empty(), "all bytes must be consumed");
    decoded
}

#[tokio::test]
async fn test_roundtrip_ping() {
    let original = Request::Ping;
    assert_eq!(request_roundtrip(original.clone()).await, original);
}

#[tokio::test]
async fn test_roundtrip_submit_pair() {
    let original = Request::SubmitPair {
        a: Matrix::from_fn(5, |row, col| row * 5 + col),
        b: Matrix::from_fn(5, |row, col| 999 - (row * 5 + col)),
    };
    assert_eq!(request_roundtrip(original.clone()).await, original);
}

#[tokio::test]
async fn test_roundtrip_sum_and_status() {
    for original in [Request::Sum { id: 0 }, Request::Status { id: 4_000_000_000 }] {
        assert_eq!(request_roundtrip(original.clone()).await, original);
    }
}

#[tokio::test]
async fn test_roundtrip_pong_stored_pending() {
    for original in [
        Response::Pong,
        Response::Stored { id: 17 },
        Response::Pending { id: 17 },
    ] {
        assert_eq!(response_roundtrip(original.clone()).await, original);
    }
}

#[tokio::test]
async fn test_roundtrip_result_matrix() {
    let original = Response::Result {
        id: 2,
        matrix: Matrix::from_fn(7, |row, col| row ^ col),
    };
    assert_eq!(response_roundtrip(original.clone()).await, original);
}

#[tokio::test]
async fn test_submit_pair_size_four_is_136_bytes() {
    let request = Request::SubmitPair {
        a: Matrix::from_fn(4, |_, _| 1),
        b: Matrix::from_fn(4, |_, _| 2),
    };
    let mut buf = Vec::new();
    write_request(&mut buf, &request).await.expect("encode");
    // 1 opcode + 1 size + 16 + 16 = 34 words.
    assert_eq!(buf.len(), 34 * WORD_SIZE);
}

#[tokio::test]
async fn test_frames_stay_aligned_across_a_whole_session() {
    // A realistic inbound sequence: stored ack, pending poll answer, a result
    // too large to display, an unknown frame, and a final pong. Decoding must
    // walk the stream frame by frame without drifting.
    let big = Matrix::from_fn(12, |row, col| row * 12 + col);
    let inbound = [
        Response::Stored { id: 0 },
        Response::Pending { id: 0 },
        Response::Result { id: 0, matrix: big },
        Response::Unknown(42),
        Response::Pong,
    ];

    let mut buf = Vec::new();
    for response in &inbound {
        write_response(&mut buf, response).await.expect("encode");
    }

    let mut reader = buf.as_slice();
    for expected in &inbound {
        let decoded = read_response(&mut reader).await.expect("decode");
        assert_eq!(&decoded, expected);
    }
    assert!(reader.is_empty());
}

#[tokio::test]
async fn test_codec_works_across_a_duplex_stream() {
    // Same exchange, but over a real split async pipe with both ends running
    // concurrently, the way the client and server tasks share the socket.
    let (client_side, server_side) = tokio::io::duplex(256);
    let (mut client_read, mut client_write) = tokio::io::split(client_side);
    let (mut server_read, mut server_write) = tokio::io::split(server_side);

    let server = tokio::spawn(async move {
        let request = read_request(&mut server_read).await.expect("server decode");
        assert_eq!(request, Request::Sum { id: 9 });
        write_response(&mut server_write, &Response::Pending { id: 9 })
            .await
            .expect("server encode");
    });

    write_request(&mut client_write, &Request::Sum { id: 9 })
        .await
        .expect("client encode");
    let response = read_response(&mut client_read).await.expect("client decode");
    assert_eq!(response, Response::Pending { id: 9 });

    server.await.expect("server task");
}

#[tokio::test]
async fn test_half_closed_stream_surfaces_as_io_error() {
    let (client_side, server_side) = tokio::io::duplex(64);
    drop(server_side);

    let (mut client_read, _client_write) = tokio::io::split(client_side);
    let result = read_response(&mut client_read).await;
    assert!(matches!(result, Err(CodecError::Io(_))));
}
