//! Integration tests for the client session against an in-process peer.
//!
//! These tests exercise the client through its public API the same way the
//! binary wires it: dial a real TCP listener, split the stream, spawn the
//! response listener, and drive the dispatcher. The peer speaks the wire
//! format through matsum-core's server-direction codec, so every byte that
//! crosses the loopback socket is a genuine protocol frame.

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;

use matsum_client::commands::{self, Command};
use matsum_client::config::Config;
use matsum_client::connection::{self, FrameReader, FrameWriter};
use matsum_client::listener::{self, SessionEvent};
use matsum_core::{read_request, write_response, Request, Response};

/// Dials a fresh loopback listener and returns the client halves plus the
/// peer's halves of the accepted stream.
async fn session() -> (FrameReader, FrameWriter, OwnedReadHalf, OwnedWriteHalf) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let accept = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        stream.into_split()
    });

    let (reader, writer) = connection::dial(&addr).await.expect("dial");
    let (peer_read, peer_write) = accept.await.expect("accept task");
    (reader, writer, peer_read, peer_write)
}

#[tokio::test]
async fn test_ping_pong_end_to_end() {
    let (reader, mut writer, mut peer_read, mut peer_write) = session().await;
    let (mut events, handle) = listener::spawn(reader);
    let config = Config::default();

    commands::dispatch(Command::Ping, &mut writer, &config)
        .await
        .expect("dispatch ping");

    // The peer sees exactly one ping frame and answers it.
    let request = read_request(&mut peer_read).await.expect("peer decode");
    assert_eq!(request, Request::Ping);
    write_response(&mut peer_write, &Response::Pong)
        .await
        .expect("peer encode");

    match events.recv().await {
        Some(SessionEvent::Response(Response::Pong)) => {}
        other => panic!("expected pong event, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_send_submits_a_well_formed_pair_and_receives_stored() {
    let (reader, mut writer, mut peer_read, mut peer_write) = session().await;
    let (mut events, handle) = listener::spawn(reader);
    let config = Config::default();

    commands::dispatch(Command::Send { size: 4 }, &mut writer, &config)
        .await
        .expect("dispatch send_4");

    let request = read_request(&mut peer_read).await.expect("peer decode");
    match request {
        Request::SubmitPair { a, b } => {
            assert_eq!(a.size(), 4);
            assert_eq!(b.size(), 4);
            assert_eq!(a.word_count(), 16);
            assert_eq!(b.word_count(), 16);
            let range = config.generator.range();
            assert!(a.words().iter().chain(b.words()).all(|w| range.contains(w)));
        }
        other => panic!("expected a submission, got {other:?}"),
    }

    write_response(&mut peer_write, &Response::Stored { id: 0 })
        .await
        .expect("peer encode");
    match events.recv().await {
        Some(SessionEvent::Response(Response::Stored { id: 0 })) => {}
        other => panic!("expected stored event, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_sum_and_status_carry_the_operator_id() {
    let (_reader, mut writer, mut peer_read, _peer_write) = session().await;
    let config = Config::default();

    commands::dispatch(Command::Sum { id: 7 }, &mut writer, &config)
        .await
        .expect("dispatch sum");
    commands::dispatch(Command::Status { id: 7 }, &mut writer, &config)
        .await
        .expect("dispatch status");

    assert_eq!(
        read_request(&mut peer_read).await.expect("first frame"),
        Request::Sum { id: 7 }
    );
    assert_eq!(
        read_request(&mut peer_read).await.expect("second frame"),
        Request::Status { id: 7 }
    );
}

#[tokio::test]
async fn test_invalid_id_never_reaches_the_socket() {
    let (_reader, mut writer, mut peer_read, _peer_write) = session().await;
    let config = Config::default();

    // The command line fails to parse, so there is nothing to dispatch,
    // mirroring the coordinator, which only dispatches parsed commands.
    let parsed = Command::parse("status not-a-number");
    assert!(parsed.is_err());

    // Prove the socket stayed silent: the next frame the peer sees is the
    // ping sent afterwards, not anything from the rejected line.
    commands::dispatch(Command::Ping, &mut writer, &config)
        .await
        .expect("dispatch ping");
    assert_eq!(
        read_request(&mut peer_read).await.expect("peer decode"),
        Request::Ping
    );
}

#[tokio::test]
async fn test_oversized_result_is_consumed_and_session_continues() {
    let (reader, _writer, _peer_read, mut peer_write) = session().await;
    let (mut events, handle) = listener::spawn(reader);

    // A 12×12 result (above the default display threshold of 10) followed
    // immediately by a pong. If the listener under-consumed the matrix, the
    // second decode would start mid-payload and never produce a pong.
    let matrix = matsum_core::Matrix::from_fn(12, |row, col| row * 12 + col);
    write_response(&mut peer_write, &Response::Result { id: 3, matrix })
        .await
        .expect("peer encode result");
    write_response(&mut peer_write, &Response::Pong)
        .await
        .expect("peer encode pong");

    match events.recv().await {
        Some(SessionEvent::Response(Response::Result { id: 3, matrix })) => {
            assert_eq!(matrix.size(), 12);
        }
        other => panic!("expected result event, got {other:?}"),
    }
    match events.recv().await {
        Some(SessionEvent::Response(Response::Pong)) => {}
        other => panic!("expected pong event, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_unknown_opcode_then_pong_stays_aligned() {
    let (reader, _writer, _peer_read, mut peer_write) = session().await;
    let (mut events, handle) = listener::spawn(reader);

    peer_write.write_u32(99).await.expect("raw unknown opcode");
    write_response(&mut peer_write, &Response::Pong)
        .await
        .expect("peer encode pong");

    match events.recv().await {
        Some(SessionEvent::Response(Response::Unknown(99))) => {}
        other => panic!("expected unknown event, got {other:?}"),
    }
    match events.recv().await {
        Some(SessionEvent::Response(Response::Pong)) => {}
        other => panic!("expected pong event, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_peer_close_surfaces_as_connection_lost() {
    let (reader, _writer, peer_read, peer_write) = session().await;
    let (mut events, handle) = listener::spawn(reader);

    drop(peer_read);
    drop(peer_write);

    match events.recv().await {
        Some(SessionEvent::ConnectionLost(_)) => {}
        other => panic!("expected connection-lost event, got {other:?}"),
    }
    handle.await.expect("listener ends after connection loss");
}
