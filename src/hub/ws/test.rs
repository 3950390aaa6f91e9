#[cfg(test)]
mod tests {
    use crate::error::HubError;
    use crate::hub::ws::WebsocketHub;
    use crate::message::{ClientMessage, ClientMethod};
    use crate::response::ServerEvent;
    use futures_util::{SinkExt, StreamExt};
    use std::net::SocketAddr;
    use tokio::net::{TcpListener, TcpStream};
    use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
    use tungstenite::{Message, Utf8Bytes};

    type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

    // Helper functions

    async fn start_server() -> SocketAddr {
        let mut hub = WebsocketHub::new();
        hub.bind_addr("127.0.0.1:0").await.expect("bind failed");
        let addr = hub.local_addr().expect("listener has no address");
        tokio::spawn(async move {
            let _ = hub.listen().await;
        });
        addr
    }

    async fn connect(addr: SocketAddr) -> ClientSocket {
        let (socket, _) = connect_async(format!("ws://{}", addr))
            .await
            .expect("connect failed");
        socket
    }

    async fn send_method(socket: &mut ClientSocket, method: ClientMethod) {
        let message = ClientMessage::new(method, String::new());
        let frame = Message::Text(Utf8Bytes::from(serde_json::to_string(&message).unwrap()));
        socket.send(frame).await.expect("send failed");
    }

    async fn next_event(socket: &mut ClientSocket) -> ServerEvent {
        loop {
            let message = socket
                .next()
                .await
                .expect("socket closed")
                .expect("socket error");
            if let Message::Text(text) = message {
                return serde_json::from_str(text.as_str()).expect("bad event json");
            }
        }
    }

    #[tokio::test]
    async fn test_websocket_hub_creation() {
        let hub = WebsocketHub::new();
        assert!(hub.tcp_listener.is_none());
    }

    #[tokio::test]
    async fn test_websocket_hub_bind() {
        let mut hub = WebsocketHub::new();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        hub.bind_listener(listener);

        assert!(hub.tcp_listener.is_some());
        assert!(hub.local_addr().is_ok());
    }

    #[tokio::test]
    async fn test_listen_without_bind_fails() {
        let mut hub = WebsocketHub::new();

        let result = hub.listen().await;
        assert!(matches!(result, Err(HubError::NotBound)));
        assert!(matches!(hub.local_addr(), Err(HubError::NotBound)));
    }

    #[tokio::test]
    async fn test_join_over_websocket() {
        let addr = start_server().await;
        let mut socket = connect(addr).await;

        send_method(
            &mut socket,
            ClientMethod::Join {
                room: "ws-duel".to_string(),
            },
        )
        .await;

        let event = next_event(&mut socket).await;
        assert!(matches!(
            event,
            ServerEvent::Joined {
                waiting: true,
                opponent_id: None
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_frames_answered_without_dropping_connection() {
        let addr = start_server().await;
        let mut socket = connect(addr).await;

        // Undecodable text frame
        socket
            .send(Message::Text(Utf8Bytes::from("not json")))
            .await
            .expect("send failed");
        let event = next_event(&mut socket).await;
        assert!(matches!(event, ServerEvent::Error { .. }));

        // Binary frames are rejected the same way
        socket
            .send(Message::Binary(b"beep".to_vec().into()))
            .await
            .expect("send failed");
        let event = next_event(&mut socket).await;
        assert!(matches!(event, ServerEvent::Error { .. }));

        // The connection still works afterwards
        send_method(
            &mut socket,
            ClientMethod::Join {
                room: "ws-duel".to_string(),
            },
        )
        .await;
        let event = next_event(&mut socket).await;
        assert!(matches!(event, ServerEvent::Joined { waiting: true, .. }));
    }

    #[tokio::test]
    async fn test_two_clients_pair_over_websocket() {
        let addr = start_server().await;

        let mut first = connect(addr).await;
        send_method(
            &mut first,
            ClientMethod::Join {
                room: "ws-pair".to_string(),
            },
        )
        .await;
        assert!(matches!(
            next_event(&mut first).await,
            ServerEvent::Joined { waiting: true, .. }
        ));

        let mut second = connect(addr).await;
        send_method(
            &mut second,
            ClientMethod::Join {
                room: "ws-pair".to_string(),
            },
        )
        .await;

        // The joiner hears start before its own pairing confirmation
        assert!(matches!(next_event(&mut second).await, ServerEvent::Start));
        assert!(matches!(
            next_event(&mut second).await,
            ServerEvent::Joined {
                waiting: false,
                opponent_id: Some(_)
            }
        ));

        // The first member is paired and then started
        assert!(matches!(
            next_event(&mut first).await,
            ServerEvent::Joined {
                waiting: false,
                opponent_id: Some(_)
            }
        ));
        assert!(matches!(next_event(&mut first).await, ServerEvent::Start));

        // Progress crosses over to the opponent only
        send_method(
            &mut second,
            ClientMethod::Progress {
                room: "ws-pair".to_string(),
                text: "The quick".to_string(),
            },
        )
        .await;
        let event = next_event(&mut first).await;
        assert!(matches!(
            event,
            ServerEvent::OpponentProgress { text } if text == "The quick"
        ));
    }
}
