//! Topology composition: `ServiceSelection` → `Topology`.
//!
//! Composition is a pure function of the selection. It never fails: the
//! selection was validated when it was built.

use std::collections::BTreeSet;

use crate::domain::{
    entities::{
        selection::ServiceSelection,
        topology::{Link, NotificationsParams, QueueParams, ServiceDescriptor, ServiceParams, Topology},
    },
    value_objects::{Extra, ServiceKind},
};

pub const QUEUE_DEFAULT_TIMEOUT: u32 = 300;
pub const QUEUE_DEFAULT_SLEEP: u32 = 5;
pub const QUEUE_DEFAULT_TRIES: u32 = 2;
pub const QUEUE_DEFAULT_QUEUES: &str = "notifications,default,background-jobs";

/// Order of the operational alias shortcuts. Adminer has none.
const DAEMON_ORDER: [ServiceKind; 5] = [
    ServiceKind::Nginx,
    ServiceKind::Redis,
    ServiceKind::Mysql,
    ServiceKind::Queue,
    ServiceKind::Notifications,
];

/// Compose the service graph for a selection.
pub fn compose(selection: &ServiceSelection) -> Topology {
    let kinds = effective_kinds(selection);

    let mut services = Vec::with_capacity(kinds.len());
    let mut links = Vec::new();

    for kind in &kinds {
        let descriptor = match kind {
            ServiceKind::Nginx => ServiceDescriptor::new(*kind).publish(selection.nginx_port()),
            ServiceKind::Mysql | ServiceKind::Redis => ServiceDescriptor::new(*kind),
            ServiceKind::Queue => {
                ServiceDescriptor::new(*kind).with_params(ServiceParams::Queue(QueueParams {
                    timeout: QUEUE_DEFAULT_TIMEOUT,
                    tries: QUEUE_DEFAULT_TRIES,
                    sleep: QUEUE_DEFAULT_SLEEP,
                    queues: QUEUE_DEFAULT_QUEUES.to_string(),
                }))
            }
            ServiceKind::Notifications => ServiceDescriptor::new(*kind)
                .publish(selection.notifications_port())
                .with_params(ServiceParams::Notifications(NotificationsParams {
                    port: selection.notifications_port(),
                    path: selection.notifications_path().clone(),
                })),
            ServiceKind::Adminer => ServiceDescriptor::new(*kind).publish(selection.adminer_port()),
        };

        if let Some(alias) = kind.host_alias() {
            links.push(Link {
                service: *kind,
                alias,
            });
        }

        services.push(descriptor);
    }

    let daemons = DAEMON_ORDER
        .iter()
        .filter(|kind| kinds.contains(kind))
        .map(|kind| kind.daemon_alias())
        .collect();

    Topology {
        name: selection.name().to_string(),
        database: selection.database(),
        services,
        links,
        daemons,
    }
}

/// Every service kind the selection implies, redis included when a daemon
/// needs it. Ordered by `ServiceKind` declaration order.
fn effective_kinds(selection: &ServiceSelection) -> BTreeSet<ServiceKind> {
    let mut kinds = BTreeSet::from([ServiceKind::Nginx]);

    if selection.database().is_mysql() {
        kinds.insert(ServiceKind::Mysql);
    }

    if selection.extras().iter().any(Extra::requires_redis) {
        kinds.insert(ServiceKind::Redis);
    }

    kinds.extend(selection.extras().iter().map(|extra| match extra {
        Extra::Queue => ServiceKind::Queue,
        Extra::Notifications => ServiceKind::Notifications,
        Extra::Adminer => ServiceKind::Adminer,
    }));

    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DatabaseVariant;

    fn selection(extras: &[Extra]) -> ServiceSelection {
        ServiceSelection::builder()
            .name("foobar")
            .extras(extras.iter().copied())
            .build()
            .unwrap()
    }

    fn kinds(topology: &Topology) -> Vec<ServiceKind> {
        topology.services().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn bare_selection_has_nginx_and_mysql_only() {
        let topology = compose(&selection(&[]));

        assert_eq!(kinds(&topology), vec![ServiceKind::Nginx, ServiceKind::Mysql]);
        assert_eq!(topology.daemon_alias_list(), ["nginx", "mysql"]);
        assert_eq!(topology.links().len(), 1);
        assert_eq!(topology.links()[0].to_string(), "mysql:${DB_HOST}");
    }

    #[test]
    fn queue_pulls_in_redis() {
        let topology = compose(&selection(&[Extra::Queue]));

        assert!(topology.has(ServiceKind::Redis));
        assert!(topology.has(ServiceKind::Queue));
        assert!(!topology.has(ServiceKind::Notifications));
        assert_eq!(
            topology.daemon_alias_list(),
            ["nginx", "redis", "mysql", "queue-daemon"]
        );
    }

    #[test]
    fn notifications_pulls_in_redis() {
        let topology = compose(&selection(&[Extra::Notifications]));

        assert!(topology.has(ServiceKind::Redis));
        let links: Vec<_> = topology.links().iter().map(ToString::to_string).collect();
        assert_eq!(links, ["mysql:${DB_HOST}", "redis:${REDIS_HOST}"]);
    }

    #[test]
    fn adminer_alone_does_not_need_redis() {
        let topology = compose(&selection(&[Extra::Adminer]));

        assert!(!topology.has(ServiceKind::Redis));
        assert!(topology.has(ServiceKind::Adminer));
        assert_eq!(topology.daemon_alias_list(), ["nginx", "mysql"]);
    }

    #[test]
    fn redis_present_iff_a_daemon_is_selected() {
        let all = [Extra::Queue, Extra::Notifications, Extra::Adminer];
        for mask in 0u8..8 {
            let extras: Vec<_> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, e)| *e)
                .collect();
            let topology = compose(&selection(&extras));

            let expects_redis = extras.contains(&Extra::Queue) || extras.contains(&Extra::Notifications);
            assert_eq!(topology.has(ServiceKind::Redis), expects_redis, "{extras:?}");
        }
    }

    #[test]
    fn every_linked_service_has_exactly_one_alias() {
        let topology = compose(&selection(&Extra::ALL));

        for kind in [ServiceKind::Mysql, ServiceKind::Redis] {
            let count = topology.links().iter().filter(|l| l.service == kind).count();
            assert_eq!(count, 1, "{kind}");
        }
        assert_eq!(topology.links().len(), 2);
    }

    #[test]
    fn full_selection_orders_daemons() {
        let topology = compose(&selection(&Extra::ALL));

        assert_eq!(
            topology.daemons_joined(),
            "nginx redis mysql queue-daemon notifications-daemon"
        );
    }

    #[test]
    fn queue_carries_fixed_defaults() {
        let topology = compose(&selection(&[Extra::Queue]));
        let queue = topology.queue().unwrap();

        assert_eq!(queue.timeout, 300);
        assert_eq!(queue.sleep, 5);
        assert_eq!(queue.tries, 2);
        assert_eq!(queue.queues, "notifications,default,background-jobs");
    }

    #[test]
    fn ports_and_memory_limits_follow_selection() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .nginx_port(1234)
            .notifications_port(2345)
            .adminer_port(3456)
            .extras([Extra::Notifications, Extra::Adminer])
            .build()
            .unwrap();
        let topology = compose(&selection);

        let port = |kind| topology.service(kind).unwrap().port.unwrap().to_string();
        assert_eq!(port(ServiceKind::Nginx), "1234:80");
        assert_eq!(port(ServiceKind::Notifications), "2345:3000");
        assert_eq!(port(ServiceKind::Adminer), "3456:80");
        assert!(topology.service(ServiceKind::Mysql).unwrap().port.is_none());
        assert_eq!(
            topology.service(ServiceKind::Notifications).unwrap().memory_limit.to_string(),
            "120m"
        );
    }

    #[test]
    fn database_variant_is_carried_not_structural() {
        let small = ServiceSelection::builder()
            .name("foobar")
            .database(DatabaseVariant::Small)
            .no_extras()
            .build()
            .unwrap();
        let small = compose(&small);
        let minimal = compose(&selection(&[]));

        assert_eq!(small.database(), DatabaseVariant::Small);
        assert_eq!(small.services(), minimal.services());
    }
}
