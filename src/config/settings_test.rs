// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_fill_missing_sections() {
    let file = write_config("bot:\n  token: \"abc\"\n  chat_id: 42\n");

    let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(settings.bot.token, "abc");
    assert_eq!(settings.bot.chat_id, 42);
    assert_eq!(settings.crawler.worker_count, 10);
    assert_eq!(settings.crawler.trigger_hour, 19);
    assert_eq!(settings.crawler.trigger_minute, 0);
    assert_eq!(settings.crawler.poll_interval(), Duration::from_secs(60));
    assert_eq!(settings.crawler.probe_timeout_secs, 5);
    assert_eq!(settings.discovery.page_count, 11);
    assert_eq!(settings.discovery.page_delay(), Duration::from_millis(50));
    assert_eq!(settings.discovery.url_filter, "blog");
    assert!(!settings.metrics.enabled);
}

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(
        r#"
crawler:
  worker_count: 4
  trigger_hour: 7
  trigger_minute: 30
discovery:
  page_count: 2
  query: "engineering blog"
database:
  url: "sqlite::memory:"
"#,
    );

    let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(settings.crawler.worker_count, 4);
    assert_eq!(settings.crawler.trigger_hour, 7);
    assert_eq!(settings.crawler.trigger_minute, 30);
    assert_eq!(settings.discovery.page_count, 2);
    assert_eq!(settings.discovery.query, "engineering blog");
    assert_eq!(settings.database.url, "sqlite::memory:");
}

#[test]
fn test_out_of_range_trigger_is_rejected() {
    let file = write_config("crawler:\n  trigger_hour: 24\n");

    let err = Settings::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("invalid settings"));
}

#[test]
fn test_zero_workers_is_rejected() {
    let file = write_config("crawler:\n  worker_count: 0\n");

    assert!(Settings::from_file(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config("metrics:\n  listen_addr: \"127.0.0.1:9100\"\n");
    std::env::set_var("JOBSCOUT__METRICS__LISTEN_ADDR", "127.0.0.1:9200");

    let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();
    std::env::remove_var("JOBSCOUT__METRICS__LISTEN_ADDR");

    assert_eq!(settings.metrics.listen_addr, "127.0.0.1:9200");
}
