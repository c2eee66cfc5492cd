//! Headless battle simulator.
//!
//! Loads the content directory, stages one encounter and lets automated
//! policies fight it out, printing the battle log to stdout.
//!
//! ```bash
//! BATTLE_ENCOUNTER=captains_duel BATTLE_SEED=42 cargo run -p battle-sim
//! ```
mod config;
mod report;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{BattleSession, FirstReadyPolicy};
use battle_runtime::{Event, PolicyProvider, Runtime, Topic};

use config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimConfig::from_env();
    if let Some(encounter) = std::env::args().nth(1) {
        config.encounter = encounter;
    }

    let factory = ContentFactory::new(&config.content_dir);
    let store = factory.load_store()?;
    let encounter = factory.load_encounter(&config.encounter).with_context(|| {
        let known = factory.encounter_names().unwrap_or_default().join(", ");
        format!("unknown encounter '{}' (available: {known})", config.encounter)
    })?;
    tracing::info!(encounter = %encounter.name, "starting simulation");

    let mut runtime = Runtime::builder()
        .config(config.runtime.clone())
        .encounter(&store, &encounter)?
        .player_provider(PolicyProvider::new(FirstReadyPolicy))
        .build()?;

    let mut combat = runtime.subscribe(Topic::Combat);
    let opening: Vec<Event> = runtime
        .opening_events()
        .iter()
        .map(|event| Event::from_battle(event, runtime.session()))
        .collect();
    print_events(&opening, runtime.session(), config.json)?;

    while !runtime.session().is_over() {
        let events = runtime.step().await?;
        let mut log = report::drain_rejections(&mut combat);
        log.extend(
            events
                .iter()
                .map(|event| Event::from_battle(event, runtime.session())),
        );
        print_events(&log, runtime.session(), config.json)?;
    }

    if !config.json {
        for line in report::survivors(runtime.session()) {
            println!("   {line}");
        }
    }
    tracing::info!(
        outcome = %runtime.outcome(),
        round = runtime.session().round(),
        "simulation finished"
    );

    Ok(())
}

fn print_events(events: &[Event], session: &BattleSession, json: bool) -> Result<()> {
    for event in events {
        if json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", report::describe(event, session));
        }
    }
    Ok(())
}
