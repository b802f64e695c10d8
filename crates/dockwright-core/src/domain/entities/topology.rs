//! The composed service graph.
//!
//! A `Topology` is produced by [`crate::domain::compose`] and consumed by the
//! renderer (deployment descriptor, alias scripts) and the env reconciler.
//! It is plain data: every decision was already made by the composer.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::common::RelativePath,
    value_objects::{DatabaseVariant, MemoryLimit, ServiceKind},
};

/// Host → container port publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// Knobs for the artisan queue worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueParams {
    /// Seconds a job may run before the worker kills it.
    pub timeout: u32,
    /// Attempts before a job is marked failed.
    pub tries: u32,
    /// Seconds to sleep when the queue is empty.
    pub sleep: u32,
    /// Comma-joined queue names, highest priority first.
    pub queues: String,
}

/// Knobs for the node notifications daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationsParams {
    pub port: u16,
    /// Where the companion node app lives, relative to the project root.
    pub path: RelativePath,
}

/// Daemon-specific parameters, only present on the services that take them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServiceParams {
    None,
    Queue(QueueParams),
    Notifications(NotificationsParams),
}

/// One container in the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub memory_limit: MemoryLimit,
    pub port: Option<PortMapping>,
    pub params: ServiceParams,
}

impl ServiceDescriptor {
    /// A descriptor with the kind's fixed memory limit and nothing else.
    pub fn new(kind: ServiceKind) -> Self {
        Self {
            kind,
            memory_limit: kind.memory_limit(),
            port: None,
            params: ServiceParams::None,
        }
    }

    /// Publish `host` on the kind's container port.
    ///
    /// Kinds without a container port ignore the call.
    pub fn publish(mut self, host: u16) -> Self {
        self.port = self
            .kind
            .container_port()
            .map(|container| PortMapping { host, container });
        self
    }

    pub fn with_params(mut self, params: ServiceParams) -> Self {
        self.params = params;
        self
    }

    /// Name of the service block in the deployment descriptor.
    pub fn compose_name(&self) -> &'static str {
        self.kind.daemon_alias()
    }
}

/// A `service:ALIAS` pair: the service is reachable under `${ALIAS}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub service: ServiceKind,
    pub alias: &'static str,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:${{{}}}", self.service, self.alias)
    }
}

/// The composed, internally-linked service graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub(crate) name: String,
    pub(crate) database: DatabaseVariant,
    pub(crate) services: Vec<ServiceDescriptor>,
    pub(crate) links: Vec<Link>,
    pub(crate) daemons: Vec<&'static str>,
}

impl Topology {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn database(&self) -> DatabaseVariant {
        self.database
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Short names used for the operational alias shortcuts.
    pub fn daemon_alias_list(&self) -> &[&'static str] {
        &self.daemons
    }

    /// Space-joined alias list, as the alias scripts consume it.
    pub fn daemons_joined(&self) -> String {
        self.daemons.join(" ")
    }

    pub fn service(&self, kind: ServiceKind) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.kind == kind)
    }

    pub fn has(&self, kind: ServiceKind) -> bool {
        self.service(kind).is_some()
    }

    pub fn queue(&self) -> Option<&QueueParams> {
        self.services.iter().find_map(|s| match &s.params {
            ServiceParams::Queue(q) => Some(q),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Option<&NotificationsParams> {
        self.services.iter().find_map(|s| match &s.params {
            ServiceParams::Notifications(n) => Some(n),
            _ => None,
        })
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.services.iter().map(|s| s.kind.as_str()).collect();
        write!(f, "{} [{}]", self.name, kinds.join(", "))
    }
}
