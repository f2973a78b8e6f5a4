//! Credential record and its on-disk JSON file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{IraError, Result};

/// Bearer token + user id, plus whatever else the token endpoint returned
/// (`expires_in`, `refresh_token`, `id_token`, ...), kept so the file round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub user_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            extra: Map::new(),
        }
    }

    /// Builds a credential from a JSON object. Both required fields must be non-empty strings.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self> {
        let access_token = required_field(&map, "access_token")?;
        let user_id = required_field(&map, "user_id")?;
        map.remove("access_token");
        map.remove("user_id");
        Ok(Self {
            access_token,
            user_id,
            extra: map,
        })
    }
}

fn required_field(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match map.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(IraError::CredentialIncomplete { field }),
    }
}

/// Reads and validates the credentials file.
///
/// Missing file → `CredentialMissing`; not a JSON object → `CredentialCorrupt`;
/// required key absent or empty → `CredentialIncomplete`.
pub async fn read_credential_file(path: &Path) -> Result<Credential> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(IraError::CredentialMissing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(IraError::Io(e)),
    };

    let value: Value = serde_json::from_str(&raw).map_err(|e| IraError::CredentialCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Credential::from_map(map),
        _ => Err(IraError::CredentialCorrupt {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }),
    }
}

/// Writes `credential` as indented JSON: temp file in the same directory, then rename over `path`.
pub async fn write_credential_file(path: &Path, credential: &Credential) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(credential).map_err(std::io::Error::from)?;

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "credentials".into());
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, json).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IraAI.json");
        std::fs::write(
            &path,
            r#"{"access_token":"T","user_id":"U","expires_in":"3600"}"#,
        )
        .unwrap();

        let credential = read_credential_file(&path).await.unwrap();
        assert_eq!(credential.access_token, "T");
        assert_eq!(credential.user_id, "U");
        assert_eq!(credential.extra["expires_in"], json!("3600"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_credential_file(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, IraError::CredentialMissing { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IraAI.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_credential_file(&path).await,
            Err(IraError::CredentialCorrupt { .. })
        ));

        std::fs::write(&path, r#"["access_token"]"#).unwrap();
        assert!(matches!(
            read_credential_file(&path).await,
            Err(IraError::CredentialCorrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_access_token_is_incomplete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IraAI.json");
        std::fs::write(&path, r#"{"user_id":"U"}"#).unwrap();

        let err = read_credential_file(&path).await.unwrap_err();
        assert!(matches!(
            err,
            IraError::CredentialIncomplete {
                field: "access_token"
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_user_id_is_incomplete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IraAI.json");
        std::fs::write(&path, r#"{"access_token":"T","user_id":""}"#).unwrap();

        let err = read_credential_file(&path).await.unwrap_err();
        assert!(matches!(err, IraError::CredentialIncomplete { field: "user_id" }));
    }

    #[tokio::test]
    async fn test_write_is_indented_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("IraAI.json");
        let mut credential = Credential::new("T", "U");
        credential.extra.insert("project_id".into(), json!("ira"));

        write_credential_file(&path, &credential).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"access_token":"T","user_id":"U","project_id":"ira"}));
        assert!(!dir.path().join("nested").join("IraAI.json.tmp").exists());

        assert_eq!(read_credential_file(&path).await.unwrap(), credential);
    }
}
