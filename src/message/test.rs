#[cfg(test)]
mod tests {
    use crate::message::{ClientMessage, ClientMethod};

    #[test]
    fn test_client_message_creation() {
        let message = ClientMessage::new(
            ClientMethod::Join {
                room: "beat-battle".to_string(),
            },
            "client123".to_string(),
        );
        assert_eq!(message.client_token, "client123");
        if let ClientMethod::Join { room } = &message.message {
            assert_eq!(room, "beat-battle");
        } else {
            panic!("Expected Join message");
        }

        let message = ClientMessage::new(ClientMethod::Leave, "client789".to_string());
        assert_eq!(message.client_token, "client789");
        assert!(matches!(message.message, ClientMethod::Leave));
    }

    #[test]
    fn test_client_message_deserialization() {
        let json_str = r#"
        {
            "message": {
                "type": "join",
                "data": { "room": "beat-battle" }
            },
            "client_token": "client123"
        }
        "#;
        let message: ClientMessage = serde_json::from_str(json_str).unwrap();
        assert_eq!(message.client_token, "client123");
        if let ClientMethod::Join { room } = message.message {
            assert_eq!(room, "beat-battle");
        } else {
            panic!("Expected Join message");
        }

        let json_str = r#"
        {
            "message": {
                "type": "progress",
                "data": { "room": "beat-battle", "text": "The quick" }
            },
            "client_token": "client456"
        }
        "#;
        let message: ClientMessage = serde_json::from_str(json_str).unwrap();
        if let ClientMethod::Progress { room, text } = message.message {
            assert_eq!(room, "beat-battle");
            assert_eq!(text, "The quick");
        } else {
            panic!("Expected Progress message");
        }

        let json_str = r#"
        {
            "message": {
                "type": "finished",
                "data": { "room": "beat-battle" }
            },
            "client_token": "client456"
        }
        "#;
        let message: ClientMessage = serde_json::from_str(json_str).unwrap();
        assert!(matches!(message.message, ClientMethod::Finished { .. }));

        let json_str = r#"
        {
            "message": {
                "type": "leave"
            },
            "client_token": "client789"
        }
        "#;
        let message: ClientMessage = serde_json::from_str(json_str).unwrap();
        assert!(matches!(message.message, ClientMethod::Leave));
    }

    #[test]
    fn test_client_message_serialization_tags() {
        let message = ClientMessage::new(
            ClientMethod::Progress {
                room: "r".to_string(),
                text: "abc".to_string(),
            },
            String::new(),
        );
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"type\":\"progress\""));
        assert!(json.contains("\"room\":\"r\""));
        assert!(json.contains("\"text\":\"abc\""));

        let message = ClientMessage::new(ClientMethod::Leave, String::new());
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"type\":\"leave\""));
    }
}
