//! WebSocket transport against a real `tokio-tungstenite` client.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use othello_transport::{Connection, Transport, WebSocketConnection, WebSocketTransport};
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds on an OS-assigned port and returns a connected client plus
    /// the server side of the same connection.
    async fn connected_pair() -> (ClientWs, WebSocketConnection) {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("bound address");

        let server = tokio::spawn(async move { transport.accept().await.expect("should accept") });
        let (client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        let conn = server.await.expect("accept task");
        (client, conn)
    }

    #[tokio::test]
    async fn test_utf8_payload_is_sent_as_text_frame() {
        let (mut client, conn) = connected_pair().await;

        conn.send(br#"{"type":"Health"}"#).await.expect("send");

        let msg = client.next().await.expect("frame").expect("ok frame");
        match msg {
            Message::Text(text) => assert_eq!(text.as_str(), r#"{"type":"Health"}"#),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_utf8_payload_is_sent_as_binary_frame() {
        let (mut client, conn) = connected_pair().await;

        conn.send(&[0xff, 0x00, 0xfe]).await.expect("send");

        let msg = client.next().await.expect("frame").expect("ok frame");
        assert!(msg.is_binary());
        assert_eq!(msg.into_data().as_ref(), &[0xff, 0x00, 0xfe]);
    }

    #[tokio::test]
    async fn test_recv_accepts_text_and_binary_frames() {
        let (mut client, conn) = connected_pair().await;

        client.send(Message::text("from text")).await.unwrap();
        client.send(Message::binary(b"from binary".to_vec())).await.unwrap();

        assert_eq!(conn.recv().await.unwrap().unwrap(), b"from text");
        assert_eq!(conn.recv().await.unwrap().unwrap(), b"from binary");
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_client_close() {
        let (mut client, conn) = connected_pair().await;

        client.send(Message::Close(None)).await.unwrap();

        let result = conn.recv().await.expect("recv should not error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_connections_get_distinct_ids() {
        let (_c1, a) = connected_pair().await;
        let (_c2, b) = connected_pair().await;

        assert_ne!(a.id(), b.id());
        assert!(a.peer_addr().ip().is_loopback());
    }
}
