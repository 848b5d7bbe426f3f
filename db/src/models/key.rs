use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDateTime;
use common::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    /// The other status; toggling always flips between the two.
    pub fn complement(self) -> Self {
        match self {
            KeyStatus::Active => KeyStatus::Inactive,
            KeyStatus::Inactive => KeyStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStatus::Active => "active",
            KeyStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(KeyStatus::Active),
            "inactive" => Ok(KeyStatus::Inactive),
            other => Err(AppError::Access(format!("invalid record status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Delete,
    Admin,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Delete => "delete",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "delete" => Ok(Permission::Delete),
            "admin" => Ok(Permission::Admin),
            other => Err(AppError::Access(format!(
                "invalid record permission '{}'",
                other
            ))),
        }
    }
}

pub type PermissionSet = BTreeSet<Permission>;

/// Raw row as stored in the `api_keys` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRow {
    pub id: Uuid,
    pub name: String,
    pub key: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub status: String,
    pub usage: i64,
    pub created_at: NaiveDateTime,
    pub last_used: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub name: String,
    pub key: String,
    pub description: String,
    pub permissions: PermissionSet,
    pub status: KeyStatus,
    pub usage: u64,
    pub created_at: NaiveDateTime,
    pub last_used: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ApiKeyRow> for ApiKey {
    type Error = AppError;

    fn try_from(row: ApiKeyRow) -> Result<Self, Self::Error> {
        let permissions = row
            .permissions
            .iter()
            .map(|p| p.parse())
            .collect::<Result<PermissionSet, _>>()?;
        let usage = u64::try_from(row.usage)
            .map_err(|_| AppError::Access(format!("invalid record usage {}", row.usage)))?;

        Ok(ApiKey {
            id: row.id,
            name: row.name,
            key: row.key,
            description: row.description,
            permissions,
            status: row.status.parse()?,
            usage,
            created_at: row.created_at,
            last_used: row.last_used,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ApiKeyRow {
        let now = chrono::Utc::now().naive_utc();
        ApiKeyRow {
            id: Uuid::new_v4(),
            name: "Production".to_string(),
            key: "sk-AAAAAAAAAAAABBBB".to_string(),
            description: "main backend".to_string(),
            permissions: vec!["write".to_string(), "read".to_string(), "read".to_string()],
            status: "active".to_string(),
            usage: 12,
            created_at: now,
            last_used: None,
            updated_at: now,
        }
    }

    #[test]
    fn valid_rows_convert_and_dedupe_permissions() {
        let key = ApiKey::try_from(row()).unwrap();
        assert_eq!(key.status, KeyStatus::Active);
        assert_eq!(key.usage, 12);
        assert_eq!(
            key.permissions.into_iter().collect::<Vec<_>>(),
            vec![Permission::Read, Permission::Write]
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut bad = row();
        bad.status = "revoked".to_string();
        let err = ApiKey::try_from(bad).unwrap_err();
        assert!(matches!(err, AppError::Access(_)));
    }

    #[test]
    fn unknown_permission_and_negative_usage_are_rejected() {
        let mut bad = row();
        bad.permissions = vec!["root".to_string()];
        assert!(ApiKey::try_from(bad).is_err());

        let mut bad = row();
        bad.usage = -1;
        assert!(ApiKey::try_from(bad).is_err());
    }

    #[test]
    fn status_complement_flips() {
        assert_eq!(KeyStatus::Active.complement(), KeyStatus::Inactive);
        assert_eq!(KeyStatus::Inactive.complement(), KeyStatus::Active);
    }

    #[test]
    fn permissions_serialize_as_lowercase_array() {
        let key = ApiKey::try_from(row()).unwrap();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["permissions"], serde_json::json!(["read", "write"]));
        assert_eq!(json["status"], "active");
    }
}
