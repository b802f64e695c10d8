//! Built-in file templates.
//!
//! Every file dockwright writes comes from one of these constants.
//! Placeholders use the `{{VARIABLE}}` syntax understood by
//! [`dockwright_core::domain::RenderContext`]; `${VAR}` references are left
//! for docker-compose to resolve from `.env`.
//!
//! # Variables
//!
//! | Variable | Used by |
//! |----------|---------|
//! | `NAME`, `NAME_KEBAB` | container names, package name |
//! | `MEM_LIMIT`, `PORT`, `LINKS` | compose service blocks |
//! | `DAEMONS` | alias scripts |
//! | `TIMEOUT`, `SLEEP`, `TRIES`, `QUEUES` | queue dockerfile |
//! | `APP_PATH` | notifications service block |

// ── docker-compose.yml ───────────────────────────────────────────────────────

pub const COMPOSE_HEADER: &str = "version: '2'\n\nservices:\n";

pub const NGINX_SERVICE: &str = r#"  nginx:
    image: webdevops/php-nginx:7.1
    container_name: {{NAME}}
    mem_limit: {{MEM_LIMIT}}
    ports:
      - {{PORT}}
    volumes:
      - ./:/app
      - ./docker/nginx/sites:/opt/docker/etc/nginx/vhost.common.d
      - ./docker/nginx/logs:/var/log/nginx
    environment:
      - WEB_DOCUMENT_ROOT=/app/public
{{LINKS}}"#;

pub const MYSQL_SERVICE: &str = r#"  mysql:
    build:
      context: ./docker/mysql
      dockerfile: mysql.dockerfile
    container_name: ${DB_HOST}
    mem_limit: {{MEM_LIMIT}}
    volumes:
      - ./docker/mysql/db:/var/lib/mysql
    environment:
      - MYSQL_ROOT_PASSWORD=${MYSQL_ROOT_PASSWORD}
      - MYSQL_DATABASE=${DB_DATABASE}
      - MYSQL_USER=${DB_USERNAME}
      - MYSQL_PASSWORD=${DB_PASSWORD}
{{LINKS}}"#;

pub const REDIS_SERVICE: &str = r#"  redis:
    image: redis:3.2-alpine
    container_name: ${REDIS_HOST}
    mem_limit: {{MEM_LIMIT}}
    command: redis-server --appendonly yes --requirepass ${REDIS_PASSWORD}
    volumes:
      - ./docker/redis:/data
{{LINKS}}"#;

pub const QUEUE_SERVICE: &str = r#"  queue-daemon:
    build:
      context: ./docker/queue
      dockerfile: queue.dockerfile
    container_name: {{NAME}}-queue
    mem_limit: {{MEM_LIMIT}}
    restart: unless-stopped
    volumes:
      - ./:/app
{{LINKS}}"#;

pub const NOTIFICATIONS_SERVICE: &str = r#"  notifications-daemon:
    build:
      context: ./docker/notifications
      dockerfile: notifications.dockerfile
    container_name: {{NAME}}-notifications
    mem_limit: {{MEM_LIMIT}}
    restart: unless-stopped
    ports:
      - {{PORT}}
    volumes:
      - ./{{APP_PATH}}:/app
    environment:
      - REDIS_HOST=${REDIS_HOST}
      - REDIS_PASSWORD=${REDIS_PASSWORD}
{{LINKS}}"#;

pub const ADMINER_SERVICE: &str = r#"  adminer:
    build:
      context: ./docker/adminer
      dockerfile: adminer.dockerfile
    container_name: {{NAME}}-adminer
    mem_limit: {{MEM_LIMIT}}
    ports:
      - {{PORT}}
    volumes:
      - ./docker/adminer/sites:/opt/docker/etc/nginx/vhost.common.d
{{LINKS}}"#;

/// One-shot tooling containers, always present.
pub const ARTISAN_SERVICE: &str = r#"  artisan:
    image: webdevops/php:7.1
    working_dir: /app
    volumes:
      - ./:/app
    entrypoint: php artisan
{{LINKS}}"#;

pub const PHPUNIT_SERVICE: &str = r#"  phpunit:
    image: webdevops/php:7.1
    working_dir: /app
    volumes:
      - ./:/app
    entrypoint: vendor/bin/phpunit
{{LINKS}}"#;

pub const PHPSPEC_SERVICE: &str = r#"  phpspec:
    image: webdevops/php:7.1
    working_dir: /app
    volumes:
      - ./:/app
    entrypoint: vendor/bin/phpspec
{{LINKS}}"#;

// ── Alias scripts ────────────────────────────────────────────────────────────

pub const DC_ALIASES: &str = r#"#!/bin/sh
# Load with: . ./dc-aliases
alias dc='docker-compose'
alias dcup='docker-compose up -d {{DAEMONS}}'
alias dcstop='docker-compose stop {{DAEMONS}}'
alias dcdown='docker-compose down'
alias dclogs='docker-compose logs -f {{DAEMONS}}'
alias artisan='docker-compose run --rm artisan'
alias phpunit='docker-compose run --rm phpunit'
alias phpspec='docker-compose run --rm phpspec'
"#;

pub const DC_ALIASES_BAT: &str = "@echo off\r
doskey dc=docker-compose $*\r
doskey dcup=docker-compose up -d {{DAEMONS}}\r
doskey dcstop=docker-compose stop {{DAEMONS}}\r
doskey dcdown=docker-compose down\r
doskey dclogs=docker-compose logs -f {{DAEMONS}}\r
doskey artisan=docker-compose run --rm artisan $*\r
doskey phpunit=docker-compose run --rm phpunit $*\r
doskey phpspec=docker-compose run --rm phpspec $*\r
";

// ── nginx ────────────────────────────────────────────────────────────────────

pub const NGINX_SITE: &str = r#"server {
    listen 80 default_server;
    server_name {{NAME}}.dev;

    root /app/public;
    index index.php index.html;

    client_max_body_size 20m;

    location / {
        try_files $uri $uri/ /index.php?$query_string;
    }

    location ~ \.php$ {
        fastcgi_split_path_info ^(.+\.php)(/.+)$;
        fastcgi_pass php;
        include fastcgi_params;
        fastcgi_param SCRIPT_FILENAME $document_root$fastcgi_script_name;
        fastcgi_param PATH_INFO $fastcgi_path_info;
    }

    location ~ /\.ht {
        deny all;
    }
}
"#;

// ── mysql ────────────────────────────────────────────────────────────────────

pub const MYSQL_DOCKERFILE: &str = r#"FROM mysql:5.7
COPY conf/my.cnf /etc/mysql/conf.d/my.cnf
"#;

pub const MYSQL_GITIGNORE: &str = "db\n";

/// Profile for machines where the database must stay tiny.
pub const MYSQL_MINIMAL_CNF: &str = r#"[mysqld]
performance_schema=off
innodb_buffer_pool_size=5M
innodb_log_buffer_size=256K
query_cache_size=0
max_connections=10
key_buffer_size=8
thread_cache_size=0
host_cache_size=0
innodb_ft_cache_size=1600000
innodb_ft_total_cache_size=32000000
thread_stack=131072
sort_buffer_size=32K
read_buffer_size=8200
read_rnd_buffer_size=8200
max_heap_table_size=16K
tmp_table_size=1K
bulk_insert_buffer_size=0
join_buffer_size=128
net_buffer_length=1K
innodb_sort_buffer_size=64K
binlog_cache_size=4K
binlog_stmt_cache_size=4K
"#;

pub const MYSQL_SMALL_CNF: &str = r#"[client]
port = 3306
socket = /var/run/mysqld/mysqld.sock

[mysqld]
port = 3306
socket = /var/run/mysqld/mysqld.sock
skip-external-locking
key_buffer_size = 16K
max_allowed_packet = 1M
table_open_cache = 4
sort_buffer_size = 64K
read_buffer_size = 256K
read_rnd_buffer_size = 256K
net_buffer_length = 2K
thread_stack = 240K
innodb_buffer_pool_size = 16M

[mysqldump]
quick
max_allowed_packet = 16M

[mysql]
no-auto-rehash

[myisamchk]
key_buffer_size = 8M
sort_buffer_size = 8M

[mysqlhotcopy]
interactive-timeout
"#;

// ── redis ────────────────────────────────────────────────────────────────────

pub const REDIS_GITIGNORE: &str = "*.aof\n";

// ── queue ────────────────────────────────────────────────────────────────────

pub const QUEUE_DOCKERFILE: &str = r#"FROM php:7.1-cli
RUN docker-php-ext-install pdo_mysql pcntl
WORKDIR /app
CMD ["php", "artisan", "queue:work", "redis", "--queue={{QUEUES}}", "--sleep={{SLEEP}}", "--tries={{TRIES}}", "--timeout={{TIMEOUT}}"]
"#;

// ── notifications ────────────────────────────────────────────────────────────

pub const NOTIFICATIONS_DOCKERFILE: &str = r#"FROM node:8-alpine
WORKDIR /app
EXPOSE 3000
CMD ["sh", "-c", "npm install --production && node redis-pusher.js"]
"#;

pub const NOTIFICATIONS_PACKAGE_JSON: &str = r#"{
  "name": "{{NAME_KEBAB}}-notifications",
  "version": "1.0.0",
  "private": true,
  "main": "redis-pusher.js",
  "scripts": {
    "start": "node redis-pusher.js"
  },
  "dependencies": {
    "ioredis": "^3.1.4",
    "socket.io": "^2.0.3"
  }
}
"#;

pub const NOTIFICATIONS_REDIS_PUSHER: &str = r#"'use strict';

const server = require('http').createServer();
const io = require('socket.io')(server);
const Redis = require('ioredis');

const redis = new Redis({
  host: process.env.REDIS_HOST,
  password: process.env.REDIS_PASSWORD
});

redis.psubscribe('*', function (err, count) {
  if (err) {
    console.error('Failed to subscribe: ' + err.message);
    process.exit(1);
  }
  console.log('Subscribed to ' + count + ' channel pattern(s)');
});

redis.on('pmessage', function (pattern, channel, message) {
  const payload = JSON.parse(message);
  io.emit(channel + ':' + payload.event, payload.data);
});

server.listen(3000, function () {
  console.log('Notifications daemon listening on port 3000');
});
"#;

pub const UPDATE_NOTIFICATIONS_SH: &str = r#"#!/bin/sh
set -e
docker-compose run --rm --no-deps notifications-daemon npm install --production
docker-compose restart notifications-daemon
"#;

pub const UPDATE_NOTIFICATIONS_BAT: &str = "@echo off\r
docker-compose run --rm --no-deps notifications-daemon npm install --production\r
docker-compose restart notifications-daemon\r
";

// ── adminer ──────────────────────────────────────────────────────────────────

pub const ADMINER_DOCKERFILE: &str = r#"FROM webdevops/php-nginx:7.1
RUN mkdir -p /app \
 && curl -sSL -o /app/index.php https://github.com/vrana/adminer/releases/download/v4.3.1/adminer-4.3.1-mysql.php
ENV WEB_DOCUMENT_ROOT=/app
"#;

pub const ADMINER_SITE: &str = r#"server {
    listen 80;
    server_name adminer.{{NAME}}.dev;

    root /app;
    index index.php;

    location / {
        try_files $uri /index.php?$query_string;
    }
}
"#;
