use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Landing payload served at `/`.
#[derive(Serialize, Debug, Clone)]
pub struct Welcome {
    pub message: &'static str,
    pub description: &'static str,
    pub docs_url: String,
}

impl Welcome {
    pub fn new(docs_url: impl Into<String>) -> Self {
        Self {
            message: "CRUD API for Taxi Driver Management",
            description: "Visit the link below to access and test the endpoints",
            docs_url: docs_url.into(),
        }
    }
}
