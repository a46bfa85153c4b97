use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn port_falls_back_to_default_when_unset() {
    let mut raw = RawSettings::default();
    raw.apply_port_env(None).expect("absent PORT is fine");

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
}

#[test]
fn port_env_replaces_configured_port() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.apply_port_env(Some(" 8080 ")).expect("numeric PORT");

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.addr.port(), 8080);
}

#[test]
fn blank_port_env_is_ignored() {
    let mut raw = RawSettings::default();
    raw.apply_port_env(Some("")).expect("blank PORT is ignored");
    assert_eq!(raw.server.port, None);
}

#[test]
fn cli_port_beats_port_env() {
    let mut raw = RawSettings::default();
    raw.apply_port_env(Some("8080")).expect("numeric PORT");
    raw.apply_serve_overrides(&ServeOverrides {
        server_port: Some(9090),
        ..Default::default()
    });

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.addr.port(), 9090);
}

#[test]
fn non_numeric_port_env_is_rejected() {
    let mut raw = RawSettings::default();
    let err = raw
        .apply_port_env(Some("http"))
        .expect_err("PORT must be numeric");
    assert!(matches!(err, LoadError::Invalid { key: "PORT", .. }));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero port");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn zero_pool_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero pool");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "database.max_connections",
            ..
        }
    ));
}

#[test]
fn blank_database_url_uses_default() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
}

#[test]
fn unparseable_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());
    let err = Settings::from_raw(raw).expect_err("bad level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["postbox"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_migrate_arguments() {
    let args = CliArgs::parse_from([
        "postbox",
        "migrate",
        "--database-url",
        "postgres://example",
    ]);

    match args.command.expect("migrate command") {
        Command::Migrate(migrate) => {
            assert_eq!(
                migrate.database.database_url.as_deref(),
                Some("postgres://example")
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_seed_arguments() {
    let args = CliArgs::parse_from([
        "postbox",
        "seed",
        "--title",
        "Test Blog",
        "--image",
        "https://example.com/cover.jpg",
        "--body",
        "HELLO THIS IS A BLOG POST",
    ]);

    match args.command.expect("seed command") {
        Command::Seed(seed) => {
            assert_eq!(seed.title, "Test Blog");
            assert_eq!(seed.image, "https://example.com/cover.jpg");
            assert_eq!(seed.body, "HELLO THIS IS A BLOG POST");
            assert!(seed.database.database_url.is_none());
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn seed_image_and_body_default_to_empty() {
    let args = CliArgs::parse_from(["postbox", "seed", "--title", "Only a title"]);

    match args.command.expect("seed command") {
        Command::Seed(seed) => {
            assert!(seed.image.is_empty());
            assert!(seed.body.is_empty());
        }
        _ => panic!("wrong command parsed"),
    }
}
