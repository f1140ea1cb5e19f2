//! ACL data model
//!
//! These types mirror the JSON document served by the identity service at
//! `/v1/entities/{entityID}/acl`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Permission level of an entity in an account or team.
///
/// `owner` and `member` are the only accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Owner,
    Member,
}

impl Permission {
    /// Wire representation of the permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Owner => "owner",
            Permission::Member => "member",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown permission string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission '{0}', expected 'owner' or 'member'")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Permission::Owner),
            "member" => Ok(Permission::Member),
            other => Err(ParsePermissionError(other.to_string())),
        }
    }
}

/// An entity's access to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAccess {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "perm")]
    pub permission: Permission,
}

/// An entity's access to a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAccess {
    pub id: Uuid,
    #[serde(rename = "perm")]
    pub permission: Permission,
}

/// Access control list for a single entity (user or robot)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    /// Accounts the entity belongs to, in the order the service returned them
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accounts: Vec<AccountAccess>,

    /// Teams the entity belongs to, in the order the service returned them
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teams: Vec<TeamAccess>,
}

impl Acl {
    /// True when the entity has no account or team access at all
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.teams.is_empty()
    }

    /// Permission held in the given account, if any
    pub fn account_permission(&self, account_id: u64) -> Option<Permission> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .map(|a| a.permission)
    }

    /// Permission held in the given team, if any
    pub fn team_permission(&self, team_id: &Uuid) -> Option<Permission> {
        self.teams
            .iter()
            .find(|t| &t.id == team_id)
            .map(|t| t.permission)
    }

    /// Accounts in which the entity is an owner
    pub fn owned_accounts(&self) -> impl Iterator<Item = &AccountAccess> {
        self.accounts
            .iter()
            .filter(|a| a.permission == Permission::Owner)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEAM_ID: &str = "fc5105af-e023-47eb-9e45-7d07872f0fbc";

    fn sample() -> Acl {
        Acl {
            accounts: vec![
                AccountAccess {
                    id: 1,
                    name: "alice".to_string(),
                    permission: Permission::Owner,
                },
                AccountAccess {
                    id: 7,
                    name: String::new(),
                    permission: Permission::Member,
                },
            ],
            teams: vec![TeamAccess {
                id: Uuid::parse_str(TEAM_ID).unwrap(),
                permission: Permission::Member,
            }],
        }
    }

    #[test]
    fn test_permission_wire_format() {
        assert_eq!(serde_json::to_string(&Permission::Owner).unwrap(), r#""owner""#);
        assert_eq!(serde_json::to_string(&Permission::Member).unwrap(), r#""member""#);

        let perm: Permission = serde_json::from_str(r#""member""#).unwrap();
        assert_eq!(perm, Permission::Member);
    }

    #[test]
    fn test_permission_rejects_unknown() {
        assert!(serde_json::from_str::<Permission>(r#""admin""#).is_err());
        assert!(serde_json::from_str::<Permission>(r#""Owner""#).is_err());
        assert_eq!(
            "admin".parse::<Permission>(),
            Err(ParsePermissionError("admin".to_string()))
        );
        assert_eq!("owner".parse::<Permission>(), Ok(Permission::Owner));
        assert_eq!(Permission::Member.to_string(), "member");
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "accounts": [
                    {"id": 1, "name": "alice", "perm": "owner"},
                    {"id": 7, "name": "", "perm": "member"}
                ],
                "teams": [
                    {"id": TEAM_ID, "perm": "member"}
                ]
            })
        );
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let acl = sample();
        let encoded = serde_json::to_vec(&acl).unwrap();
        let decoded: Acl = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, acl);
    }

    #[test]
    fn test_missing_and_null_collections() {
        let acl: Acl = serde_json::from_str("{}").unwrap();
        assert!(acl.is_empty());

        let acl: Acl = serde_json::from_str(r#"{"accounts": null, "teams": null}"#).unwrap();
        assert_eq!(acl, Acl::default());
    }

    #[test]
    fn test_lenient_fields() {
        let acl: Acl = serde_json::from_str(
            r#"{"accounts":[{"id":3,"perm":"owner","extra":true}],"teams":[],"etag":"x"}"#,
        )
        .unwrap();
        assert_eq!(acl.accounts[0].name, "");
        assert_eq!(acl.accounts[0].permission, Permission::Owner);
    }

    #[test]
    fn test_rejects_bad_team_id() {
        let result = serde_json::from_str::<Acl>(r#"{"teams":[{"id":"nope","perm":"owner"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_helpers() {
        let acl = sample();
        assert_eq!(acl.account_permission(1), Some(Permission::Owner));
        assert_eq!(acl.account_permission(7), Some(Permission::Member));
        assert_eq!(acl.account_permission(2), None);

        let team = Uuid::parse_str(TEAM_ID).unwrap();
        assert_eq!(acl.team_permission(&team), Some(Permission::Member));
        assert_eq!(acl.team_permission(&Uuid::new_v4()), None);

        let owned: Vec<u64> = acl.owned_accounts().map(|a| a.id).collect();
        assert_eq!(owned, vec![1]);
        assert!(!acl.is_empty());
    }
}
