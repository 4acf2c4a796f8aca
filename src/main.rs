// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use jobscout::application::use_cases::job_search::JobSearchUseCase;
use jobscout::config::settings::Settings;
use jobscout::engines::careers_prober::CareersProber;
use jobscout::infrastructure::database::connection;
use jobscout::infrastructure::repositories::career_repo_impl::CareerRepositoryImpl;
use jobscout::infrastructure::search::AlgoliaSearchIndex;
use jobscout::infrastructure::telegram::{TelegramClient, TelegramNotifier};
use jobscout::presentation::handlers::MessageHandler;
use jobscout::presentation::TelegramBot;
use jobscout::queue::CrawlScheduler;
use jobscout::workers::CrawlPipeline;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use jobscout::utils::telemetry;
use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并运行机器人更新循环
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting jobscout...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.metrics.enabled {
        jobscout::infrastructure::metrics::init_metrics(&settings.metrics);
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Crawl pipeline and scheduler
    let search_index = Arc::new(AlgoliaSearchIndex::new(settings.discovery.clone())?);
    let prober = Arc::new(CareersProber::from_settings(&settings.crawler)?);
    let pipeline = Arc::new(CrawlPipeline::new(
        search_index,
        prober,
        settings.crawler.clone(),
        settings.discovery.clone(),
    ));
    let scheduler = CrawlScheduler::new(pipeline, &settings.crawler);

    // 5. Chat bot
    let client = TelegramClient::new(&settings.bot.api_base_url, &settings.bot.token);
    let careers = Arc::new(CareerRepositoryImpl::new(db.clone()));
    let handler = Arc::new(MessageHandler::new(
        settings.bot.chat_id,
        scheduler,
        Arc::new(JobSearchUseCase::new(careers)),
        Arc::new(TelegramNotifier::new(client.clone(), settings.bot.chat_id)),
    ));
    let bot = TelegramBot::new(client, handler.clone(), settings.bot.poll_timeout_secs);

    // 6. Shutdown signal cancels every session
    let root = CancellationToken::new();
    tokio::spawn(shutdown_signal(root.clone()));

    if let Some(user) = settings.bot.user.as_deref().filter(|u| !u.is_empty()) {
        info!("Serving chat {} for {}", settings.bot.chat_id, user);
    }

    let outcome = bot.run(root.clone()).await;
    root.cancel();
    handler.shutdown().await;

    if let Err(e) = &outcome {
        error!("Bot stopped with error: {}", e);
    }
    info!("Process terminated");
    outcome
}

async fn shutdown_signal(root: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    root.cancel();
}
