//! Built-in service templates and key mappings

use super::{ServiceCatalog, ServiceTemplate};

pub(super) fn catalog() -> ServiceCatalog {
    ServiceCatalog::new()
        .with_template(
            "postgres",
            ServiceTemplate::new("postgres:13")
                .port("5432:5432")
                .env("POSTGRES_DB", "mydatabase")
                .env("POSTGRES_USER", "user")
                .env("POSTGRES_PASSWORD", "password"),
        )
        .with_template(
            "mysql",
            ServiceTemplate::new("mysql:8")
                .port("3306:3306")
                .env("MYSQL_DATABASE", "mydatabase")
                .env("MYSQL_USER", "user")
                .env("MYSQL_PASSWORD", "password")
                .env("MYSQL_ROOT_PASSWORD", "password"),
        )
        .with_template(
            "mariadb",
            ServiceTemplate::new("mariadb:10")
                .port("3306:3306")
                .env("MARIADB_DATABASE", "mydatabase")
                .env("MARIADB_USER", "user")
                .env("MARIADB_PASSWORD", "password")
                .env("MARIADB_ROOT_PASSWORD", "password"),
        )
        .with_template("redis", ServiceTemplate::new("redis:6").port("6379:6379"))
        .with_template(
            "kafka",
            ServiceTemplate::new("bitnami/kafka:latest")
                .port("9092:9092")
                .env("KAFKA_BROKER_ID", "1")
                .env("KAFKA_LISTENERS", "PLAINTEXT://:9092")
                .env("KAFKA_ADVERTISED_LISTENERS", "PLAINTEXT://kafka:9092")
                .env("KAFKA_ZOOKEEPER_CONNECT", "zookeeper:2181")
                .env("ALLOW_PLAINTEXT_LISTENER", "yes")
                .depends_on("zookeeper"),
        )
        .with_template(
            "rabbitmq",
            ServiceTemplate::new("rabbitmq:3-management")
                .port("5672:5672")
                .port("15672:15672"),
        )
        .with_template(
            "zookeeper",
            ServiceTemplate::new("bitnami/zookeeper:latest")
                .port("2181:2181")
                .env("ALLOW_ANONYMOUS_LOGIN", "yes"),
        )
        .with_template("mongodb", ServiceTemplate::new("mongo:6").port("27017:27017"))
        .with_key("spring.kafka.bootstrap-servers", "kafka")
        .with_key("spring.redis.host", "redis")
        .with_key("spring.data.redis.host", "redis")
        .with_key("spring.rabbitmq.host", "rabbitmq")
        .with_key("spring.rabbitmq.addresses", "rabbitmq")
        .with_key("spring.data.mongodb.uri", "mongodb")
        .with_key("spring.data.mongodb.host", "mongodb")
        .with_key("spring.cloud.zookeeper.connect-string", "zookeeper")
        .with_key("zookeeper.connect", "zookeeper")
        .with_marker("postgresql", "postgres")
        .with_marker("mysql", "mysql")
        .with_marker("mariadb", "mariadb")
}
