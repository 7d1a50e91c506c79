use std::sync::Arc;

use chrono::Local;

use fiesta_app::{AppConfig, AppContext, DailySummaryView, EventsView, watch_changes};
use fiesta_session::{RemoteSessionProvider, SessionProvider};
use fiesta_store::{EventStore, RemoteEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fiesta_observability::init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(RemoteEventStore::new(
        &config.store_url,
        &config.store_key,
        &config.access_token,
    ));
    let session = Arc::new(RemoteSessionProvider::new(
        &config.store_url,
        &config.store_key,
        &config.access_token,
    ));
    let ctx = AppContext::new(store.clone(), session.clone());

    let Some(user) = session.current_user().await? else {
        tracing::error!("no active session; sign in and set FIESTA_ACCESS_TOKEN");
        return Ok(());
    };
    tracing::info!(username = %user.username, "signed in");

    let today = Local::now().date_naive();

    let mut view = EventsView::new();
    view.refresh(&ctx, today).await;
    print_events(&mut view);

    let mut daily = DailySummaryView::new();
    daily.set_date(&ctx, today).await;
    print_daily(&mut daily);

    // Follow the change feed until interrupted; every notice re-runs the
    // listing query.
    let poller = store.start_change_poller(user.username.clone(), config.poll_interval);
    let feed = store.subscribe_to_changes();

    tokio::select! {
        _ = watch_changes(feed, &mut view, &ctx, print_events) => {
            tracing::warn!("change feed closed");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    poller.abort();
    Ok(())
}

fn print_events(view: &mut EventsView) {
    println!("Upcoming events:");
    if view.events().is_empty() {
        println!("  (none)");
    }
    for event in view.events() {
        println!(
            "  #{} {} {} [{}] at {} (total ₱{:.2})",
            event.id,
            event.date,
            event.name,
            event.event_type,
            event.address,
            event.total_cost(),
        );
    }
    print_notices(view.take_notices());
}

fn print_daily(view: &mut DailySummaryView) {
    match view.summary() {
        Some(summary) if !summary.is_empty() => {
            println!("Materials for {}:", summary.date);
            for material in &summary.materials {
                println!(
                    "  {} x{} @ ₱{:.2}",
                    material.material_name, material.quantity, material.cost
                );
            }
            println!("  Total Cost ₱{:.2}", summary.total_cost());
        }
        Some(summary) => println!("No materials for {}", summary.date),
        None => println!("No materials"),
    }
    print_notices(view.take_notices());
}

fn print_notices(notices: Vec<fiesta_app::Notice>) {
    for notice in notices {
        match notice.kind {
            fiesta_app::NoticeKind::Info => {
                tracing::info!("{}: {}", notice.title, notice.detail);
            }
            fiesta_app::NoticeKind::Error => {
                tracing::error!("{}: {}", notice.title, notice.detail);
            }
        }
    }
}
