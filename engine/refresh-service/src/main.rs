use refresh_service::{boom_board, PlayerQuery, RefreshConfig, RefreshService};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting Ball Numbers refresh service");

    // Load configuration
    let config = RefreshConfig::from_env();
    info!(
        "Loaded configuration: season {} week {:?} conference '{}'",
        config.season, config.week, config.conference
    );

    let service = RefreshService::new(config).await?;

    let snapshot = match service.refresh().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Refresh failed: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Refreshed {} players across {} teams for season {} week {}",
        snapshot.players.len(),
        snapshot.teams.len(),
        snapshot.season,
        snapshot.week
    );

    for (rank, player) in boom_board(&snapshot, &PlayerQuery::default(), 5).iter().enumerate() {
        info!(
            "#{} {} ({} {}) vs {} - proj {:.1}, boom {:.0}%",
            rank + 1,
            player.name,
            player.team,
            player.position,
            if player.opponent.is_empty() { "TBD" } else { &player.opponent },
            player.proj,
            player.boom * 100.0
        );
    }

    Ok(())
}
