//! End-to-end session tests against an in-process Engine.IO server.

use futures_util::{SinkExt, Stream, StreamExt};
use sio_client::domain::{ClientConfig, ClientEvent};
use sio_client::infrastructure::{run_session, SessionSummary, TransportError};
use sio_core::PayloadValue;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message as WsMessage};

fn config_for(port: u16, namespace: &str) -> ClientConfig {
    ClientConfig {
        url: format!("ws://127.0.0.1:{port}/socket.io/?EIO=4&transport=websocket"),
        namespace: namespace.to_string(),
        ..ClientConfig::default()
    }
}

async fn next_text<S>(stream: &mut S) -> String
where
    S: Stream<Item = Result<WsMessage, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        match stream.next().await {
            Some(Ok(WsMessage::Text(text))) => return text.to_string(),
            Some(Ok(_)) => continue,
            other => panic!("expected a text message, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_session_handshake_heartbeat_and_binary_event() {
    // Arrange: a server that scripts one short session.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let ws = accept_async(tcp).await.unwrap();
        let (mut sink, mut stream) = ws.split();

        sink.send(WsMessage::Text(r#"0{"sid":"abc","pingInterval":25000}"#.into()))
            .await
            .unwrap();
        let connect = next_text(&mut stream).await;

        sink.send(WsMessage::Text("2".into())).await.unwrap();
        let pong = next_text(&mut stream).await;

        sink.send(WsMessage::Text("40".into())).await.unwrap();
        sink.send(WsMessage::Text(r#"42["chat","hi"]"#.into()))
            .await
            .unwrap();
        sink.send(WsMessage::Text(
            r#"451-["upload",{"_placeholder":true,"num":0}]"#.into(),
        ))
        .await
        .unwrap();
        sink.send(WsMessage::Binary(vec![1, 2, 3].into())).await.unwrap();
        sink.send(WsMessage::Text("41".into())).await.unwrap();
        sink.send(WsMessage::Text("1".into())).await.unwrap();

        (connect, pong)
    });

    let (tx, mut rx) = mpsc::channel(16);

    // Act
    let summary = run_session(&config_for(port, "/"), tx).await.unwrap();
    let (connect, pong) = server.await.unwrap();

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    // Assert
    assert_eq!(connect, "40");
    assert_eq!(pong, "3");
    assert_eq!(
        summary,
        SessionSummary {
            frames: 5,
            discarded: 0,
            incomplete: 0,
        }
    );
    assert_eq!(
        events,
        vec![
            ClientEvent::Connected,
            ClientEvent::Event {
                name: "chat".to_string(),
                args: vec![PayloadValue::from("hi")],
                ack_id: None,
                internal: false,
            },
            ClientEvent::Event {
                name: "upload".to_string(),
                args: vec![PayloadValue::Bytes(vec![1, 2, 3])],
                ack_id: None,
                internal: false,
            },
            ClientEvent::Disconnected {
                reason: "Got Disconnect".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_session_in_namespace_requests_it_and_ignores_others() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let ws = accept_async(tcp).await.unwrap();
        let (mut sink, mut stream) = ws.split();

        sink.send(WsMessage::Text(r#"0{"sid":"abc"}"#.into()))
            .await
            .unwrap();
        let connect = next_text(&mut stream).await;

        sink.send(WsMessage::Text("40/chat,".into())).await.unwrap();
        sink.send(WsMessage::Text(r#"42/admin,["secret"]"#.into()))
            .await
            .unwrap();
        sink.send(WsMessage::Text(r#"43/chat,7["ok"]"#.into()))
            .await
            .unwrap();
        sink.send(WsMessage::Close(None)).await.unwrap();

        connect
    });

    let (tx, mut rx) = mpsc::channel(16);

    let summary = run_session(&config_for(port, "/chat"), tx).await.unwrap();
    let connect = server.await.unwrap();

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert_eq!(connect, "40/chat,");
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.discarded, 1, "the /admin event is dropped");
    assert_eq!(
        events,
        vec![
            ClientEvent::Connected,
            ClientEvent::Ack {
                ack_id: 7,
                payload: vec![PayloadValue::from("ok")],
            },
        ]
    );
}

#[tokio::test]
async fn test_unreachable_server_is_a_connect_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let (tx, _rx) = mpsc::channel(1);

    let result = run_session(&config_for(port, "/"), tx).await;

    assert!(matches!(result, Err(TransportError::Connect { .. })));
}
