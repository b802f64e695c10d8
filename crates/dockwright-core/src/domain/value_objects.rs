//! Domain value objects: DatabaseVariant, Extra, ServiceKind, MemoryLimit.
//!
//! # Design
//!
//! These are pure value types: `Copy`, compared by value, no identity.
//! This file's only job is to define the types, their string
//! representations, their fixed per-kind constants, and their `FromStr`
//! parsers.
//!
//! # Adding New Services
//!
//! 1. Add the `ServiceKind` variant here with its `as_str`, memory limit and
//!    daemon alias
//! 2. Teach `composer.rs` when to include it
//! 3. Add its compose fragment in the adapters crate

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DatabaseVariant ──────────────────────────────────────────────────────────

/// Which MySQL configuration profile the database container uses.
///
/// Both variants produce the same `mysql` service; the variant only picks
/// the `my.cnf` that gets copied next to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseVariant {
    #[default]
    Minimal,
    Small,
}

impl DatabaseVariant {
    pub const ALL: [DatabaseVariant; 2] = [Self::Minimal, Self::Small];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Small => "small",
        }
    }

    /// Every variant in this domain is a MySQL variant.
    pub const fn is_mysql(&self) -> bool {
        matches!(self, Self::Minimal | Self::Small)
    }

    /// Name of the bundled configuration profile for this variant.
    pub const fn profile_file(&self) -> &'static str {
        match self {
            Self::Minimal => "mysql-minimal.cnf",
            Self::Small => "mysql-small.cnf",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "MySQL Database (minimal configuration)",
            Self::Small => "MySQL Database (small configuration)",
        }
    }
}

impl fmt::Display for DatabaseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" | "minimalmysql" | "mysql-minimal" => Ok(Self::Minimal),
            "small" | "smallmysql" | "mysql-small" => Ok(Self::Small),
            other => Err(DomainError::UnknownDatabaseVariant {
                value: other.to_string(),
            }),
        }
    }
}

// ── Extra ────────────────────────────────────────────────────────────────────

/// An optional container the user can ask for.
///
/// `redis` is deliberately not an `Extra`: it is only ever pulled in by
/// `Queue` or `Notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extra {
    Queue,
    Notifications,
    Adminer,
}

impl Extra {
    pub const ALL: [Extra; 3] = [Self::Queue, Self::Notifications, Self::Adminer];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Notifications => "notifications",
            Self::Adminer => "adminer",
        }
    }

    /// Whether this extra talks to redis and therefore implies it.
    pub const fn requires_redis(&self) -> bool {
        matches!(self, Self::Queue | Self::Notifications)
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Queue => "Artisan queue daemon (through redis)",
            Self::Notifications => "Notifications daemon (through redis)",
            Self::Adminer => "Adminer",
        }
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extra {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" | "queue-daemon" => Ok(Self::Queue),
            "notifications" | "notifications-daemon" => Ok(Self::Notifications),
            "adminer" => Ok(Self::Adminer),
            other => Err(DomainError::UnknownExtra {
                value: other.to_string(),
            }),
        }
    }
}

// ── MemoryLimit ──────────────────────────────────────────────────────────────

/// A container memory ceiling in megabytes, rendered compose-style (`100m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct MemoryLimit(u32);

impl MemoryLimit {
    pub const fn megabytes(mb: u32) -> Self {
        Self(mb)
    }

    pub const fn as_megabytes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MemoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl From<MemoryLimit> for String {
    fn from(limit: MemoryLimit) -> Self {
        limit.to_string()
    }
}

// ── ServiceKind ──────────────────────────────────────────────────────────────

/// Every kind of container a topology can contain.
///
/// Declaration order is the order services appear in a composed topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Nginx,
    Mysql,
    Redis,
    Queue,
    Notifications,
    Adminer,
}

impl ServiceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nginx => "nginx",
            Self::Mysql => "mysql",
            Self::Redis => "redis",
            Self::Queue => "queue",
            Self::Notifications => "notifications",
            Self::Adminer => "adminer",
        }
    }

    /// Fixed memory ceiling for this kind of container.
    pub const fn memory_limit(&self) -> MemoryLimit {
        match self {
            Self::Nginx => MemoryLimit::megabytes(100),
            Self::Mysql => MemoryLimit::megabytes(100),
            Self::Redis => MemoryLimit::megabytes(50),
            Self::Queue => MemoryLimit::megabytes(100),
            Self::Notifications => MemoryLimit::megabytes(120),
            Self::Adminer => MemoryLimit::megabytes(50),
        }
    }

    /// Service name inside the compose file and the operational alias name.
    pub const fn daemon_alias(&self) -> &'static str {
        match self {
            Self::Nginx => "nginx",
            Self::Mysql => "mysql",
            Self::Redis => "redis",
            Self::Queue => "queue-daemon",
            Self::Notifications => "notifications-daemon",
            Self::Adminer => "adminer",
        }
    }

    /// Port the process listens on inside its container, if it is exposed.
    pub const fn container_port(&self) -> Option<u16> {
        match self {
            Self::Nginx | Self::Adminer => Some(80),
            Self::Notifications => Some(3000),
            Self::Mysql | Self::Redis | Self::Queue => None,
        }
    }

    /// The env key other services use to reach this one, for link targets.
    pub const fn host_alias(&self) -> Option<&'static str> {
        match self {
            Self::Mysql => Some("DB_HOST"),
            Self::Redis => Some("REDIS_HOST"),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_variant_accepts_prompt_values() {
        assert_eq!(
            "minimalMySQL".parse::<DatabaseVariant>().unwrap(),
            DatabaseVariant::Minimal
        );
        assert_eq!(
            "smallMySQL".parse::<DatabaseVariant>().unwrap(),
            DatabaseVariant::Small
        );
        assert_eq!("SMALL".parse::<DatabaseVariant>().unwrap(), DatabaseVariant::Small);
        assert!("postgres".parse::<DatabaseVariant>().is_err());
    }

    #[test]
    fn database_variant_defaults_to_minimal() {
        assert_eq!(DatabaseVariant::default(), DatabaseVariant::Minimal);
        assert_eq!(DatabaseVariant::Minimal.profile_file(), "mysql-minimal.cnf");
    }

    #[test]
    fn redis_is_not_an_extra() {
        assert!(matches!(
            "redis".parse::<Extra>(),
            Err(DomainError::UnknownExtra { .. })
        ));
    }

    #[test]
    fn only_daemons_require_redis() {
        assert!(Extra::Queue.requires_redis());
        assert!(Extra::Notifications.requires_redis());
        assert!(!Extra::Adminer.requires_redis());
    }

    #[test]
    fn memory_limits_render_compose_style() {
        assert_eq!(ServiceKind::Nginx.memory_limit().to_string(), "100m");
        assert_eq!(ServiceKind::Redis.memory_limit().to_string(), "50m");
        assert_eq!(ServiceKind::Notifications.memory_limit().to_string(), "120m");
    }

    #[test]
    fn only_linked_services_have_host_aliases() {
        assert_eq!(ServiceKind::Mysql.host_alias(), Some("DB_HOST"));
        assert_eq!(ServiceKind::Redis.host_alias(), Some("REDIS_HOST"));
        assert_eq!(ServiceKind::Queue.host_alias(), None);
    }
}
