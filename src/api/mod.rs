use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone, Debug)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Deserialize, Debug)]
pub struct AskResponse {
    pub answer: String,
}
