/// A connected player. The id is the transport-allocated connection
/// handle; rooms reference it but never own the participant.
///
/// `label` and `token` exist for an identity collaborator to fill in;
/// the engine itself only ever routes by id.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: u64,
    pub room: Option<String>,
    pub label: String,
    pub token: String,
}

impl Participant {
    pub fn new(id: u64, room: Option<String>, label: String, token: String) -> Self {
        Participant {
            id,
            room,
            label,
            token,
        }
    }
}
