//! Prints engine notifications to the console as they arrive.

use tokio::sync::{mpsc, watch};
use hostvoucher_common::models::ChangeCause;
use hostvoucher_core::eventbus::GamificationEvent;

/// Renders one event as a console line; `None` for events not worth showing.
pub fn describe(event: &GamificationEvent) -> Option<String> {
    match event {
        GamificationEvent::Notice(text) => Some(format!("[notice] {text}")),
        GamificationEvent::MiningStarted => Some("[mining] started".to_string()),
        GamificationEvent::MiningStopped => Some("[mining] stopped".to_string()),
        GamificationEvent::StateChanged { state, cause } => {
            let points = state.as_ref().map(|s| s.points).unwrap_or(0);
            match cause {
                // one line per second would drown the prompt
                ChangeCause::Mined { .. } => None,
                ChangeCause::Activated => Some(format!("[state] activated, points={points}")),
                ChangeCause::Deactivated => Some(format!("[state] deactivated, points={points}")),
                ChangeCause::Rewarded { kind, subject_id, points: earned } => Some(format!(
                    "[reward] +{earned} for {kind} on '{subject_id}', points={points}"
                )),
                ChangeCause::BadgePurchased { badge, price } => {
                    Some(format!("[badge] bought '{badge}' for {price}, points={points}"))
                }
                ChangeCause::SpecialBadgeGranted { badge, points: credited } => Some(format!(
                    "[badge] granted '{badge}' (+{credited}), points={points}"
                )),
                ChangeCause::Replaced => Some(format!("[state] replaced, points={points}")),
            }
        }
    }
}

pub async fn print_events(
    mut rx: mpsc::Receiver<GamificationEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            maybe = rx.recv() => {
                let Some(event) = maybe else { break };
                if let Some(line) = describe(&event) {
                    println!("{line}");
                }
            }
        }
    }
}
