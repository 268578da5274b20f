use serde::Serialize;

/// Outbound push payload for the `/v2/pushes` endpoint.
///
/// `kind` is `"note"` for plain pushes and `"link"` when a URL is attached.
#[derive(Debug, Clone, Serialize)]
pub struct Push {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Push {
    pub fn note(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: "note".to_string(),
            title: title.into(),
            body: body.into(),
            url: None,
        }
    }

    pub fn link(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: "link".to_string(),
            title: title.into(),
            body: body.into(),
            url: Some(url.into()),
        }
    }
}
