use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Key already exists: {0}")]
    NodeExist(String),

    #[error("etcd error {code}: {message}")]
    Api { code: u32, message: String },

    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// etcd v2 error codes.
pub(crate) const KEY_NOT_FOUND: u32 = 100;
pub(crate) const NOT_A_FILE: u32 = 102;
pub(crate) const NOT_A_DIR: u32 = 104;
pub(crate) const NODE_EXIST: u32 = 105;

impl StoreError {
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound(_))
    }

    pub(crate) fn from_code(code: u32, message: String, cause: String) -> Self {
        match code {
            KEY_NOT_FOUND => StoreError::KeyNotFound(cause),
            NODE_EXIST => StoreError::NodeExist(cause),
            _ => StoreError::Api {
                code,
                message: format!("{message} ({cause})"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_code() {
        let err = StoreError::from_code(100, "Key not found".into(), "/skydns/com".into());
        assert_matches!(err, StoreError::KeyNotFound(ref key) if key == "/skydns/com");
        assert!(err.is_key_not_found());

        let err = StoreError::from_code(105, "Key already exists".into(), "/skydns/a".into());
        assert_matches!(err, StoreError::NodeExist(_));
        assert!(!err.is_key_not_found());

        let err = StoreError::from_code(102, "Not a file".into(), "/skydns".into());
        assert_matches!(err, StoreError::Api { code: 102, .. });
    }
}
