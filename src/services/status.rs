use rand::seq::IndexedRandom;
use rand::Rng;
use serenity::all::{ActivityData, Context};
use tokio::time::interval;
use tracing::{debug, info};

use crate::constants::timeouts::{format_duration, STATUS_ROTATION_INTERVAL};

/// Pick the next presence text, avoiding an immediate repeat when there is a choice
pub fn next_status<'a, R: Rng + ?Sized>(
    statuses: &'a [String],
    current: Option<&str>,
    rng: &mut R,
) -> Option<&'a String> {
    if statuses.len() <= 1 {
        return statuses.first();
    }

    let candidates: Vec<&String> = statuses
        .iter()
        .filter(|status| Some(status.as_str()) != current)
        .collect();

    candidates.choose(rng).copied()
}

/// Rotate the bot's "playing" status through the configured list
pub fn spawn_status_rotation(ctx: Context, statuses: Vec<String>) {
    if statuses.is_empty() {
        debug!("No statuses configured, presence rotation disabled");
        return;
    }

    info!(
        "Started status rotation over {} statuses (every {})",
        statuses.len(),
        format_duration(STATUS_ROTATION_INTERVAL)
    );

    tokio::spawn(async move {
        let mut ticker = interval(STATUS_ROTATION_INTERVAL);
        let mut current: Option<String> = None;

        loop {
            ticker.tick().await;

            let next = next_status(&statuses, current.as_deref(), &mut rand::rng()).cloned();
            if let Some(status) = next {
                debug!("Setting status to {}", status);
                ctx.set_activity(Some(ActivityData::playing(status.clone())));
                current = Some(status);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn statuses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_list() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(next_status(&[], None, &mut rng).is_none());
    }

    #[test]
    fn test_single_status_repeats() {
        let mut rng = StdRng::seed_from_u64(1);
        let list = statuses(&["Overwatch 2"]);
        assert_eq!(next_status(&list, Some("Overwatch 2"), &mut rng).map(String::as_str), Some("Overwatch 2"));
    }

    #[test]
    fn test_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = statuses(&["scrims", "VOD review", "tryouts"]);

        for _ in 0..50 {
            let next = next_status(&list, Some("scrims"), &mut rng).expect("a status");
            assert_ne!(next, "scrims");
        }
    }
}
