//! HTTP front of the mine-clearing game engine.
//!
//! Wires [`sweeper_core::GameService`] to storage, randomness and the clock, and exposes it as an
//! axum [`Router`].

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use sweeper_core::{Clock, GameRepository, GameService, RandomSource};

use crate::clock::SystemClock;
use crate::config::Config;
use crate::random::{SeededRandom, ThreadRandom};
use crate::storage::{DirBackend, KvGameRepository, MemoryBackend};

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod random;
pub mod storage;
pub mod view;

pub type Service = GameService<
    Box<dyn GameRepository + Send + Sync>,
    Box<dyn RandomSource + Send + Sync>,
    Box<dyn Clock + Send + Sync>,
>;

#[derive(Clone)]
pub struct AppState {
    service: Arc<Service>,
}

impl AppState {
    pub fn new<R, G, C>(repository: R, random: G, clock: C) -> Self
    where
        R: GameRepository + Send + Sync + 'static,
        G: RandomSource + Send + Sync + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let repository: Box<dyn GameRepository + Send + Sync> = Box::new(repository);
        let random: Box<dyn RandomSource + Send + Sync> = Box::new(random);
        let clock: Box<dyn Clock + Send + Sync> = Box::new(clock);
        Self {
            service: Arc::new(GameService::new(repository, random, clock)),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let repository: Box<dyn GameRepository + Send + Sync> = match &config.data_dir {
            Some(dir) => Box::new(KvGameRepository::new(DirBackend::open(dir)?)),
            None => {
                log::warn!("No data directory given, games are kept in memory only");
                Box::new(KvGameRepository::new(MemoryBackend::new()))
            }
        };
        let random: Box<dyn RandomSource + Send + Sync> = match config.seed {
            Some(seed) => {
                log::info!("Using fixed seed {seed}");
                Box::new(SeededRandom::new(seed))
            }
            None => Box::new(ThreadRandom),
        };
        Ok(Self::new(repository, random, SystemClock))
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route("/games/{id}", get(handlers::get_game))
        .route("/games/{id}/reveal", put(handlers::reveal_cell))
        .route("/games/{id}/mark", put(handlers::mark_cell))
        .with_state(state)
}
