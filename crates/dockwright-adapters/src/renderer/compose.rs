//! docker-compose renderer built on the built-in templates.

use std::path::Path;

use dockwright_core::{
    application::{ApplicationError, ports::TopologyRenderer},
    domain::{
        DatabaseVariant, Link, Permissions, ProjectStructure, RenderContext, ServiceDescriptor,
        ServiceKind, ServiceParams, Topology,
    },
    error::DockwrightResult,
};
use tracing::{debug, instrument};

use crate::builtin_templates as tpl;

/// Renders a topology into `docker-compose.yml`, the alias scripts and the
/// per-service support files under `docker/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeRenderer;

impl ComposeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TopologyRenderer for ComposeRenderer {
    #[instrument(skip_all, fields(topology = %topology))]
    fn render(&self, topology: &Topology, output_root: &Path) -> DockwrightResult<ProjectStructure> {
        let ctx = RenderContext::new(topology.name()).with_variable("DAEMONS", topology.daemons_joined());
        let mut structure = ProjectStructure::new(output_root);

        structure.add_file("docker-compose.yml", compose_file(topology, &ctx), rw());
        structure.add_file("dc-aliases", ctx.render(tpl::DC_ALIASES), rw());
        structure.add_file("dc-aliases.bat", ctx.render(tpl::DC_ALIASES_BAT), rw());

        for service in topology.services() {
            add_support_files(&mut structure, topology, service, &ctx)?;
        }

        debug!(entries = structure.entry_count(), "topology rendered");
        Ok(structure)
    }
}

const fn rw() -> Permissions {
    Permissions::read_write()
}

fn add_support_files(
    structure: &mut ProjectStructure,
    topology: &Topology,
    service: &ServiceDescriptor,
    ctx: &RenderContext,
) -> DockwrightResult<()> {
    match service.kind {
        ServiceKind::Nginx => {
            structure.add_directory("docker/nginx/sites", rw());
            structure.add_directory("docker/nginx/logs", rw());
            structure.add_file("docker/nginx/sites/nginx.dev", ctx.render(tpl::NGINX_SITE), rw());
        }
        ServiceKind::Mysql => {
            let cnf = match topology.database() {
                DatabaseVariant::Minimal => tpl::MYSQL_MINIMAL_CNF,
                DatabaseVariant::Small => tpl::MYSQL_SMALL_CNF,
            };
            structure.add_directory("docker/mysql/conf", rw());
            structure.add_directory("docker/mysql/db", rw());
            structure.add_file("docker/mysql/conf/my.cnf", cnf.to_string(), rw());
            structure.add_file("docker/mysql/mysql.dockerfile", tpl::MYSQL_DOCKERFILE.to_string(), rw());
            structure.add_file("docker/mysql/.gitignore", tpl::MYSQL_GITIGNORE.to_string(), rw());
        }
        ServiceKind::Redis => {
            structure.add_directory("docker/redis", rw());
            structure.add_file("docker/redis/.gitignore", tpl::REDIS_GITIGNORE.to_string(), rw());
        }
        ServiceKind::Queue => {
            let ServiceParams::Queue(queue) = &service.params else {
                return Err(missing_params(service.kind));
            };
            let queue_ctx = ctx
                .clone()
                .with_variable("TIMEOUT", queue.timeout)
                .with_variable("SLEEP", queue.sleep)
                .with_variable("TRIES", queue.tries)
                .with_variable("QUEUES", &queue.queues);

            structure.add_directory("docker/queue", rw());
            structure.add_file(
                "docker/queue/queue.dockerfile",
                queue_ctx.render(tpl::QUEUE_DOCKERFILE),
                rw(),
            );
        }
        ServiceKind::Notifications => {
            let ServiceParams::Notifications(notifications) = &service.params else {
                return Err(missing_params(service.kind));
            };
            let app = notifications.path.as_path();

            structure.add_directory("docker/notifications", rw());
            structure.add_directory(app, rw());
            structure.add_file(
                "docker/notifications/notifications.dockerfile",
                tpl::NOTIFICATIONS_DOCKERFILE.to_string(),
                rw(),
            );
            structure.add_file(app.join("package.json"), ctx.render(tpl::NOTIFICATIONS_PACKAGE_JSON), rw());
            structure.add_file(
                app.join("redis-pusher.js"),
                tpl::NOTIFICATIONS_REDIS_PUSHER.to_string(),
                rw(),
            );
            structure.add_file(
                "update-notifications-service.sh",
                tpl::UPDATE_NOTIFICATIONS_SH.to_string(),
                Permissions::executable(),
            );
            structure.add_file(
                "update-notifications-service.bat",
                tpl::UPDATE_NOTIFICATIONS_BAT.to_string(),
                rw(),
            );
        }
        ServiceKind::Adminer => {
            structure.add_directory("docker/adminer/sites", rw());
            structure.add_file(
                "docker/adminer/adminer.dockerfile",
                tpl::ADMINER_DOCKERFILE.to_string(),
                rw(),
            );
            structure.add_file("docker/adminer/sites/adminer.dev", ctx.render(tpl::ADMINER_SITE), rw());
        }
    }
    Ok(())
}

fn missing_params(kind: ServiceKind) -> dockwright_core::error::DockwrightError {
    ApplicationError::RenderingFailed {
        reason: format!("{kind} service has no parameters"),
    }
    .into()
}

fn compose_file(topology: &Topology, ctx: &RenderContext) -> String {
    let mut blocks = Vec::new();

    for service in topology.services() {
        let template = match service.kind {
            ServiceKind::Nginx => tpl::NGINX_SERVICE,
            ServiceKind::Mysql => tpl::MYSQL_SERVICE,
            ServiceKind::Redis => tpl::REDIS_SERVICE,
            ServiceKind::Queue => tpl::QUEUE_SERVICE,
            ServiceKind::Notifications => tpl::NOTIFICATIONS_SERVICE,
            ServiceKind::Adminer => tpl::ADMINER_SERVICE,
        };

        let deps = dependencies(service.kind);
        let links = topology.links().iter().filter(|l| deps.contains(&l.service));

        let mut service_ctx = ctx
            .clone()
            .with_variable("MEM_LIMIT", service.memory_limit)
            .with_variable("LINKS", links_block(links));
        if let Some(port) = service.port {
            service_ctx = service_ctx.with_variable("PORT", port);
        }
        if let ServiceParams::Notifications(n) = &service.params {
            service_ctx = service_ctx.with_variable("APP_PATH", &n.path);
        }

        blocks.push(service_ctx.render(template));
    }

    let tool_ctx = ctx
        .clone()
        .with_variable("LINKS", links_block(topology.links().iter()));
    for tool in [tpl::ARTISAN_SERVICE, tpl::PHPUNIT_SERVICE, tpl::PHPSPEC_SERVICE] {
        blocks.push(tool_ctx.render(tool));
    }

    format!("{}{}", tpl::COMPOSE_HEADER, blocks.join("\n"))
}

/// Services whose host alias a container needs.
const fn dependencies(kind: ServiceKind) -> &'static [ServiceKind] {
    match kind {
        ServiceKind::Nginx | ServiceKind::Queue => &[ServiceKind::Mysql, ServiceKind::Redis],
        ServiceKind::Notifications => &[ServiceKind::Redis],
        ServiceKind::Adminer => &[ServiceKind::Mysql],
        ServiceKind::Mysql | ServiceKind::Redis => &[],
    }
}

fn links_block<'a>(links: impl Iterator<Item = &'a Link>) -> String {
    let lines: String = links.map(|link| format!("      - {link}\n")).collect();
    if lines.is_empty() {
        lines
    } else {
        format!("    links:\n{lines}")
    }
}
