#[cfg(test)]
mod tests {
    use crate::response::ServerEvent;

    #[test]
    fn test_joined_wire_shape() {
        let event = ServerEvent::Joined {
            waiting: true,
            opponent_id: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"joined","data":{"waiting":true}}"#);

        let event = ServerEvent::Joined {
            waiting: false,
            opponent_id: Some(7),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"joined","data":{"waiting":false,"opponentId":7}}"#
        );
    }

    #[test]
    fn test_payload_free_events() {
        assert_eq!(
            serde_json::to_string(&ServerEvent::Start).unwrap(),
            r#"{"type":"start"}"#
        );
        assert_eq!(
            serde_json::to_string(&ServerEvent::OpponentFinished).unwrap(),
            r#"{"type":"opponent-finished"}"#
        );
        assert_eq!(
            serde_json::to_string(&ServerEvent::OpponentLeft).unwrap(),
            r#"{"type":"opponent-left"}"#
        );
    }

    #[test]
    fn test_progress_payload_round_trips_unmodified() {
        let event = ServerEvent::OpponentProgress {
            text: "The quick".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"opponent-progress","data":{"text":"The quick"}}"#
        );

        let parsed: ServerEvent = serde_json::from_str(&json).unwrap();
        if let ServerEvent::OpponentProgress { text } = parsed {
            assert_eq!(text, "The quick");
        } else {
            panic!("Expected OpponentProgress event");
        }
    }

    #[test]
    fn test_rejection_and_error_events() {
        let json = serde_json::to_string(&ServerEvent::RoomFull {
            room: "busy".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"room-full","data":{"room":"busy"}}"#);

        let json = serde_json::to_string(&ServerEvent::Error {
            message: "malformed frame".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","data":{"message":"malformed frame"}}"#
        );
    }

    #[test]
    fn test_deserialize_events_from_wire() {
        let event: ServerEvent = serde_json::from_str(r#"{"type":"start"}"#).unwrap();
        assert!(matches!(event, ServerEvent::Start));

        let event: ServerEvent =
            serde_json::from_str(r#"{"type":"joined","data":{"waiting":true}}"#).unwrap();
        if let ServerEvent::Joined {
            waiting,
            opponent_id,
        } = event
        {
            assert!(waiting);
            assert_eq!(opponent_id, None);
        } else {
            panic!("Expected Joined event");
        }
    }
}
