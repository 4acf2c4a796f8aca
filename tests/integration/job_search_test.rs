// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{crawler_settings, mount_search_index, pipeline, start_careers_site, FixedClock};
use jobscout::application::use_cases::job_search::JobSearchUseCase;
use jobscout::domain::repositories::career_repository::CareerRepository;
use jobscout::infrastructure::repositories::career_repo_impl::CareerRepositoryImpl;
use jobscout::infrastructure::telegram::{TelegramClient, TelegramNotifier};
use jobscout::queue::CrawlScheduler;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn career_repo() -> Arc<CareerRepositoryImpl> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(CareerRepositoryImpl::new(Arc::new(db)))
}

#[tokio::test]
async fn test_new_careers_are_recorded_and_announced() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    mount_search_index(&index, &[format!("http://blog.a.com:{}/x", site.port())]).await;

    let careers_url = format!("http://a.com:{}/careers", site.port());
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTOKEN/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": 100,
            "text": format!("I found some new careers for you: \n{}", careers_url)
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 1, "chat": {"id": 100}}
        })))
        .expect(1)
        .mount(&telegram)
        .await;

    let repo = career_repo().await;
    let use_case = JobSearchUseCase::new(repo.clone());
    let notifier = Arc::new(TelegramNotifier::new(
        TelegramClient::new(telegram.uri(), "TOKEN"),
        100,
    ));

    let scheduler = CrawlScheduler::new(pipeline(&index, site), &crawler_settings())
        .with_clock(FixedClock::at(19, 0));
    let session = scheduler.start(&CancellationToken::new());
    let token = session.cancel_token();

    let consumer = tokio::spawn(async move {
        use_case.run_notifications(session, notifier).await;
    });

    tokio::time::timeout(Duration::from_secs(10), async {
        while !repo.check_exists(&careers_url).await.unwrap() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("career was never recorded");

    token.cancel();
    consumer.await.unwrap();

    let all = repo.get_all_careers().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].seen);
    assert!(!all[0].liked);
}

#[tokio::test]
async fn test_known_careers_are_not_announced_again() {
    let site = start_careers_site().await;
    let index = MockServer::start().await;
    mount_search_index(&index, &[format!("http://blog.a.com:{}/x", site.port())]).await;

    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTOKEN/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 1, "chat": {"id": 100}}
        })))
        .expect(0)
        .mount(&telegram)
        .await;

    let repo = career_repo().await;
    repo.create_career(&format!("http://a.com:{}/careers", site.port()))
        .await
        .unwrap();
    let use_case = JobSearchUseCase::new(repo.clone());

    let scheduler = CrawlScheduler::new(pipeline(&index, site), &crawler_settings())
        .with_clock(FixedClock::at(19, 0));
    let mut session = scheduler.start(&CancellationToken::new());

    // 先取走本周期的结果，再交给用例做差
    let found = match tokio::time::timeout(Duration::from_secs(10), session.next_event())
        .await
        .expect("no cycle within the poll interval")
    {
        Some(jobscout::queue::SessionEvent::Results(found)) => found,
        other => panic!("unexpected event: {other:?}"),
    };

    let fresh = use_case.clean_up_search(&found).await.unwrap();
    assert!(fresh.is_empty());
    assert_eq!(repo.get_all_careers().await.unwrap().len(), 1);
    session.stop();
}
