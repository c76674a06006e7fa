use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::notes_outcome::NotesOutcome;
use crate::errors::{RelnotesError, RelnotesResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::ai_providers::openai::OpenAIProvider;
use crate::services::github::GitHubClient;
use crate::services::notes_parser::NotesParser;
use crate::services::stream_bridge::StreamBridge;
use crate::structs::change_record::ChangeRecord;
use crate::traits::ai_provider::AiProvider;
use crate::ui::notes_server::NotesServer;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> RelnotesResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Serve { port, open } => self.serve_command(port, open).await,
            Commands::Generate {
                owner,
                repo,
                per_page,
                pages,
                batch_size,
            } => {
                self.generate_command(owner, repo, per_page, pages, batch_size)
                    .await
            }
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> RelnotesResult<()> {
        log::info!("🚀 Initializing relnotes configuration...");

        let path = ConfigManager::create_sample_config()?;
        log::info!("✅ Configuration file created at {}", path.display());
        log::info!("📝 Edit it to point at your repository, then run 'relnotes serve'.");

        Ok(())
    }

    async fn serve_command(&self, port: Option<u16>, open: bool) -> RelnotesResult<()> {
        let config = Arc::new(ConfigManager::load()?);
        let timeout = Duration::from_secs(config.server.request_timeout_secs);

        let github = Arc::new(GitHubClient::new(&config.github, timeout));
        let provider: Arc<dyn AiProvider> = Arc::new(OpenAIProvider::new(&config.ai, timeout)?);
        let bridge = Arc::new(StreamBridge::new(provider, config.ai.batch_size));

        let mut server = NotesServer::new(Arc::clone(&config), github, bridge);
        let bound_port = server.start(port).await?;
        let url = format!("http://127.0.0.1:{}", bound_port);

        if open {
            if let Err(e) = webbrowser::open(&url) {
                log::warn!("🌐 Could not open browser: {}", e);
            }
        }

        log::info!("🌐 Serving release notes UI at {} (ctrl-c to stop)", url);
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| RelnotesError::system_error("wait for shutdown signal", &e.to_string()))?;

        server.shutdown().await
    }

    async fn generate_command(
        &self,
        owner: Option<String>,
        repo: Option<String>,
        per_page: Option<u32>,
        pages: u32,
        batch_size: Option<usize>,
    ) -> RelnotesResult<()> {
        let config = ConfigManager::load()?;
        let owner = owner.unwrap_or_else(|| config.github.owner.clone());
        let repo = repo.unwrap_or_else(|| config.github.repo.clone());
        let per_page = per_page.unwrap_or(config.github.per_page);
        let timeout = Duration::from_secs(config.server.request_timeout_secs);

        let github = GitHubClient::new(&config.github, timeout);
        let provider: Arc<dyn AiProvider> = Arc::new(OpenAIProvider::new(&config.ai, timeout)?);
        let bridge = StreamBridge::new(provider, batch_size.unwrap_or(config.ai.batch_size));

        let mut spinner = AnimatedLogger::start(format!(
            "Fetching merged pull requests from {}/{}",
            owner, repo
        ));
        let records = match Self::fetch_pages(&github, &spinner, &owner, &repo, per_page, pages).await
        {
            Ok(records) => records,
            Err(e) => {
                spinner.error("Failed to fetch pull requests").await;
                return Err(e);
            }
        };
        spinner
            .stop(&format!("Fetched {} merged pull requests", records.len()))
            .await;

        if records.is_empty() {
            log::info!("ℹ️ Nothing to summarize");
            return Ok(());
        }

        // Raw stream view while accumulating; parsing waits for the full
        // buffer.
        let mut rx = bridge.open(records)?;
        let mut buffer = String::new();
        while let Some(fragment) = rx.recv().await {
            print!("{}", fragment);
            let _ = io::stdout().flush();
            buffer.push_str(&fragment);
        }
        println!();

        if buffer.is_empty() {
            return Err(RelnotesError::generation_error(
                None,
                "the provider produced no output",
            ));
        }

        match NotesParser::reconcile(&buffer) {
            NotesOutcome::Parsed(notes) => {
                println!("\n📝 Structured notes:");
                for note in notes {
                    println!("#{}", note.id);
                    println!("  🔧 {}", note.developer_note);
                    println!("  📣 {}", note.marketing_note);
                }
            }
            NotesOutcome::MissingKeys => {
                eprintln!("🤖 The model didn't respond as expected—try again?");
            }
            NotesOutcome::Malformed { raw } => {
                eprintln!("⚠️ Could not parse model output as JSON—showing raw stream below.");
                println!("{}", raw);
            }
        }

        Ok(())
    }

    /// Pagination driver: follows the next-page cursor, accumulating
    /// records until the upstream reports the end or the page cap hits.
    async fn fetch_pages(
        github: &GitHubClient,
        spinner: &AnimatedLogger,
        owner: &str,
        repo: &str,
        per_page: u32,
        max_pages: u32,
    ) -> RelnotesResult<Vec<ChangeRecord>> {
        let mut records = Vec::new();
        let mut page = 1;
        let mut fetched_pages = 0;

        loop {
            spinner.set_message(format!(
                "Fetching merged pull requests from {}/{} (page {})",
                owner, repo, page
            ));

            let batch = github.fetch_merged_page(owner, repo, page, per_page).await?;
            records.extend(batch.diffs);
            fetched_pages += 1;

            match batch.next_page {
                Some(next) if fetched_pages < max_pages => page = next,
                _ => break,
            }
        }

        Ok(records)
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
