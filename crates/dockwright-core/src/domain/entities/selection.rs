//! The `ServiceSelection` input and its typestate builder.
//!
//! A `ServiceSelection` is the fully-validated answer to "which containers do
//! you want". Once built it is immutable; the composer treats it as trusted
//! input and never fails on it.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) so that
//! `build()` is only reachable after a base name has been provided. Runtime
//! validation (`validate`) still runs at `build()` for the cross-field
//! invariants the type system can't express.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{DatabaseVariant, Extra, ServiceKind},
};

pub const DEFAULT_NGINX_PORT: u16 = 8888;
pub const DEFAULT_NOTIFICATIONS_PORT: u16 = 8080;
pub const DEFAULT_NOTIFICATIONS_PATH: &str = "nodejs-apps/notifications";
pub const DEFAULT_ADMINER_PORT: u16 = 9999;

// ── Aggregate ────────────────────────────────────────────────────────────────

/// Validated user choices, fixed at composition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelection {
    name: String,
    nginx_port: u16,
    database: DatabaseVariant,
    extras: BTreeSet<Extra>,
    notifications_port: u16,
    notifications_path: RelativePath,
    adminer_port: u16,
}

impl ServiceSelection {
    /// Start building a new `ServiceSelection`.
    pub fn builder() -> SelectionBuilder<NoName> {
        SelectionBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn nginx_port(&self) -> u16 {
        self.nginx_port
    }
    pub const fn database(&self) -> DatabaseVariant {
        self.database
    }
    pub fn extras(&self) -> &BTreeSet<Extra> {
        &self.extras
    }
    pub fn has_extra(&self, extra: Extra) -> bool {
        self.extras.contains(&extra)
    }
    pub const fn notifications_port(&self) -> u16 {
        self.notifications_port
    }
    pub fn notifications_path(&self) -> &RelativePath {
        &self.notifications_path
    }
    pub const fn adminer_port(&self) -> u16 {
        self.adminer_port
    }

    /// Host ports that will actually be published, paired with their owner.
    fn published_ports(&self) -> Vec<(ServiceKind, u16)> {
        let mut ports = vec![(ServiceKind::Nginx, self.nginx_port)];
        if self.has_extra(Extra::Notifications) {
            ports.push((ServiceKind::Notifications, self.notifications_port));
        }
        if self.has_extra(Extra::Adminer) {
            ports.push((ServiceKind::Adminer, self.adminer_port));
        }
        ports
    }

    /// Validate the selection's internal consistency.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;

        let ports = self.published_ports();
        for (service, port) in &ports {
            if *port == 0 {
                return Err(DomainError::InvalidPort {
                    service: service.as_str(),
                    port: *port,
                });
            }
        }

        for (i, (first, port)) in ports.iter().enumerate() {
            if let Some((second, _)) = ports[i + 1..].iter().find(|(_, p)| p == port) {
                return Err(DomainError::InvalidSelection(format!(
                    "{first} and {second} both publish host port {port}"
                )));
            }
        }

        Ok(())
    }
}

/// Docker container-name grammar: `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
///
/// The name is written unquoted into `.env`, so anything outside this set
/// could break the next parse.
fn validate_name(name: &str) -> Result<(), DomainError> {
    let reason = match name.chars().next() {
        None => Some("name cannot be empty"),
        Some(first) if !first.is_ascii_alphanumeric() => {
            Some("name must start with a letter or digit")
        }
        Some(_)
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')) =>
        {
            Some("only ASCII letters, digits, '_', '.' and '-' are allowed")
        }
        Some(_) => None,
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

// ── Typestate markers ────────────────────────────────────────────────────────

/// Marker: base name has not yet been set.
pub struct NoName;
/// Marker: base name has been set; the selection can be built.
pub struct HasName;

// ── Builder ──────────────────────────────────────────────────────────────────

/// Typestate builder for [`ServiceSelection`].
///
/// Unset fields fall back to the documented defaults. When no extras are
/// specified at all, every extra is selected.
pub struct SelectionBuilder<N> {
    name: Option<String>,
    nginx_port: u16,
    database: DatabaseVariant,
    extras: Option<BTreeSet<Extra>>,
    notifications_port: u16,
    notifications_path: String,
    adminer_port: u16,
    _marker: PhantomData<N>,
}

impl SelectionBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: None,
            nginx_port: DEFAULT_NGINX_PORT,
            database: DatabaseVariant::default(),
            extras: None,
            notifications_port: DEFAULT_NOTIFICATIONS_PORT,
            notifications_path: DEFAULT_NOTIFICATIONS_PATH.to_string(),
            adminer_port: DEFAULT_ADMINER_PORT,
            _marker: PhantomData,
        }
    }
}

impl Default for SelectionBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SelectionBuilder<N> {
    /// Set the base name. This transitions the builder to `HasName`.
    pub fn name(self, name: impl Into<String>) -> SelectionBuilder<HasName> {
        SelectionBuilder {
            name: Some(name.into()),
            nginx_port: self.nginx_port,
            database: self.database,
            extras: self.extras,
            notifications_port: self.notifications_port,
            notifications_path: self.notifications_path,
            adminer_port: self.adminer_port,
            _marker: PhantomData,
        }
    }

    pub fn nginx_port(mut self, port: u16) -> Self {
        self.nginx_port = port;
        self
    }

    pub fn database(mut self, database: DatabaseVariant) -> Self {
        self.database = database;
        self
    }

    /// Add one extra to the explicit set.
    pub fn extra(mut self, extra: Extra) -> Self {
        self.extras.get_or_insert_with(BTreeSet::new).insert(extra);
        self
    }

    /// Replace the explicit set of extras.
    pub fn extras(mut self, extras: impl IntoIterator<Item = Extra>) -> Self {
        self.extras = Some(extras.into_iter().collect());
        self
    }

    /// Select no optional services at all.
    pub fn no_extras(mut self) -> Self {
        self.extras = Some(BTreeSet::new());
        self
    }

    pub fn notifications_port(mut self, port: u16) -> Self {
        self.notifications_port = port;
        self
    }

    pub fn notifications_path(mut self, path: impl Into<String>) -> Self {
        self.notifications_path = path.into();
        self
    }

    pub fn adminer_port(mut self, port: u16) -> Self {
        self.adminer_port = port;
        self
    }
}

impl SelectionBuilder<HasName> {
    /// Finalize and validate the selection.
    pub fn build(self) -> Result<ServiceSelection, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        let selection = ServiceSelection {
            name,
            nginx_port: self.nginx_port,
            database: self.database,
            extras: self
                .extras
                .unwrap_or_else(|| Extra::ALL.into_iter().collect()),
            notifications_port: self.notifications_port,
            notifications_path: RelativePath::try_new(self.notifications_path)?,
            adminer_port: self.adminer_port,
        };

        selection.validate()?;
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_every_extra() {
        let selection = ServiceSelection::builder().name("foobar").build().unwrap();

        assert_eq!(selection.nginx_port(), 8888);
        assert_eq!(selection.database(), DatabaseVariant::Minimal);
        assert_eq!(selection.extras().len(), 3);
        assert_eq!(selection.notifications_port(), 8080);
        assert_eq!(
            selection.notifications_path().to_string(),
            "nodejs-apps/notifications"
        );
        assert_eq!(selection.adminer_port(), 9999);
    }

    #[test]
    fn explicit_extra_replaces_default_set() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .extra(Extra::Queue)
            .build()
            .unwrap();

        assert!(selection.has_extra(Extra::Queue));
        assert!(!selection.has_extra(Extra::Adminer));
    }

    #[test]
    fn no_extras_is_empty() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .no_extras()
            .build()
            .unwrap();
        assert!(selection.extras().is_empty());
    }

    #[test]
    fn rejects_bad_names() {
        for name in [
            "", "my app", "a/b", "-lead", "${X}", "o'neil", "a\"b", "a#b", "café", "x=y",
        ] {
            let result = ServiceSelection::builder().name(name).build();
            assert!(
                matches!(result, Err(DomainError::InvalidName { .. })),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn rejects_absolute_notifications_path() {
        let result = ServiceSelection::builder()
            .name("foobar")
            .notifications_path("/srv/notifications")
            .build();
        assert!(matches!(
            result,
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn accepts_container_name_grammar() {
        for name in ["foobar", "Shop2", "my.app", "my_app-v2", "0day"] {
            assert!(
                ServiceSelection::builder().name(name).build().is_ok(),
                "rejected: {name:?}"
            );
        }
    }

    #[test]
    fn rejects_notifications_path_outside_root() {
        let result = ServiceSelection::builder()
            .name("foo")
            .notifications_path("../../outside")
            .build();
        assert!(matches!(result, Err(DomainError::PathEscapesRoot { .. })));
    }

    #[test]
    fn rejects_zero_port() {
        let result = ServiceSelection::builder()
            .name("foobar")
            .nginx_port(0)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidPort { .. })));
    }

    #[test]
    fn rejects_port_collision_between_published_services() {
        let result = ServiceSelection::builder()
            .name("foobar")
            .extras([Extra::Adminer])
            .adminer_port(8888)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidSelection(_))));
    }

    #[test]
    fn unselected_service_ports_are_not_checked() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .no_extras()
            .adminer_port(8888)
            .build();
        assert!(selection.is_ok());
    }
}
