// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    crawler_settings, mount_search_index, pipeline, start_careers_site, FixedClock, INDEX_PATH,
};
use jobscout::domain::models::career::ResultSet;
use jobscout::queue::{CrawlScheduler, SchedulerState, SessionEvent};
use jobscout::utils::errors::CrawlError;
use jobscout::workers::CycleOutcome;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_cycle_finds_remote_careers_page() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    mount_search_index(
        &index,
        &[
            format!("http://blog.a.com:{}/x", site.port()),
            format!("http://blog.b.com:{}/y", site.port()),
            "https://news.example.com/launch".to_string(),
        ],
    )
    .await;

    let outcome = pipeline(&index, site)
        .run_cycle(&CancellationToken::new())
        .await
        .unwrap();

    let expected: ResultSet = [format!("http://a.com:{}/careers", site.port())]
        .into_iter()
        .collect();
    assert_eq!(outcome, CycleOutcome::Completed(expected));
}

#[tokio::test]
async fn test_session_delivers_cycle_results() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    mount_search_index(&index, &[format!("http://blog.a.com:{}/x", site.port())]).await;

    let scheduler = CrawlScheduler::new(pipeline(&index, site), &crawler_settings())
        .with_clock(FixedClock::at(19, 0));
    let mut session = scheduler.start(&CancellationToken::new());

    let event = tokio::time::timeout(Duration::from_secs(10), session.next_event())
        .await
        .expect("no cycle within the poll interval");

    match event {
        Some(SessionEvent::Results(found)) => {
            assert_eq!(found.len(), 1);
            assert!(found.contains(&format!("http://a.com:{}/careers", site.port())));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    session.stop();
    assert!(session.next_event().await.is_none());
    assert_eq!(session.state(), SchedulerState::Stopped);
}

#[tokio::test]
async fn test_index_failure_reaches_error_stream_once() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&index)
        .await;

    let scheduler = CrawlScheduler::new(pipeline(&index, site), &crawler_settings())
        .with_clock(FixedClock::at(19, 0));
    let mut session = scheduler.start(&CancellationToken::new());

    let mut events = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(event) = session.next_event().await {
            events.push(event);
        }
    })
    .await
    .expect("session did not end after a fatal error");

    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        SessionEvent::Failed(CrawlError::Discovery(_))
    ));
    assert_eq!(session.state(), SchedulerState::Stopped);
}

#[tokio::test]
async fn test_off_schedule_session_stays_idle() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    mount_search_index(&index, &[format!("http://blog.a.com:{}/x", site.port())]).await;

    let scheduler = CrawlScheduler::new(pipeline(&index, site), &crawler_settings())
        .with_clock(FixedClock::at(6, 15));
    let mut session = scheduler.start(&CancellationToken::new());

    let waited = tokio::time::timeout(Duration::from_millis(2500), session.next_event()).await;

    assert!(waited.is_err());
    assert_eq!(session.state(), SchedulerState::Idle);
    assert!(index.received_requests().await.unwrap_or_default().is_empty());
    session.stop();
    session.join().await;
}
