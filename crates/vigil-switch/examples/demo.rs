//! Minimal wiring of a switch: simulated clock, mock settlement, one
//! check-in, a reconfigure, and a few refresh ticks.
//!
//! Run with `cargo run -p vigil-switch --example demo`.

use chrono::Duration;
use std::sync::Arc;
use vigil_core::SwitchConfig;
use vigil_effects::{MockSettlement, SimulatedClock};
use vigil_switch::{StateRefresher, SwitchController};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let clock = SimulatedClock::new("2024-01-01T00:00:00Z".parse().expect("valid instant"));
    let settlement = MockSettlement::new();
    let config = SwitchConfig::validate(90, "0x5afe").expect("valid config");

    let controller = Arc::new(
        SwitchController::with_config(
            Arc::new(clock.clone()),
            Arc::new(settlement.clone()),
            config,
        )
        .await,
    );

    let state = controller.current_state().await;
    println!("boot:        {} ({})", state.countdown_label(), state.classification);

    // a month goes by, then the user checks in
    clock.advance(Duration::days(30));
    let state = controller.confirm().await.expect("settlement acknowledges");
    println!("after ping:  {} ({})", state.countdown_label(), state.classification);

    // tighten the timeout to 30 days
    controller
        .reconfigure(30, "0x5afe")
        .await
        .expect("settlement acknowledges");

    // drift to within a day of the new deadline
    clock.advance(Duration::days(29) + Duration::hours(12));
    let refresher = StateRefresher::spawn(
        Arc::clone(&controller),
        std::time::Duration::from_millis(20),
    )
    .await;
    tokio::time::sleep(std::time::Duration::from_millis(60)).await;
    let state = refresher.latest();
    println!("near limit:  {} ({})", state.countdown_label(), state.classification);

    for event in controller.history().iter() {
        println!("history:     check-in at {}", event.display_label(&clock.current()));
    }

    refresher.shutdown();
}
