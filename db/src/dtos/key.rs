use crate::models::key::PermissionSet;

pub struct KeyCreateRequest {
    pub name: String,
    pub key: String,
    pub description: String,
    pub permissions: PermissionSet,
}

/// Editable fields of a key. The secret, status, usage and creation time
/// are never part of an update.
#[derive(Debug, Clone)]
pub struct KeyUpdateRequest {
    pub name: String,
    pub description: String,
    pub permissions: PermissionSet,
}

pub(crate) fn permission_names(permissions: &PermissionSet) -> Vec<String> {
    permissions.iter().map(|p| p.to_string()).collect()
}
