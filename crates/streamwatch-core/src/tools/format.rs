//! Human-readable texts returned to the agent.

use crate::registry::{AddOutcome, DeleteOutcome, UpdateOutcome};
use crate::status::{ChannelStatus, LiveStream, StreamStatus};

pub fn added(name: &str, outcome: AddOutcome) -> String {
    match outcome {
        AddOutcome::Added => format!("Streamer \"{name}\" added."),
        AddOutcome::AlreadyExists => already_exists(name),
    }
}

pub fn updated(old_name: &str, new_name: &str, outcome: UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Updated => format!("Streamer \"{old_name}\" updated to \"{new_name}\"."),
        UpdateOutcome::NotFound => not_found(old_name),
        UpdateOutcome::NameTaken => already_exists(new_name),
    }
}

pub fn deleted(name: &str, outcome: DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Deleted => format!("Streamer \"{name}\" deleted."),
        DeleteOutcome::NotFound => not_found(name),
    }
}

pub fn streamer_list(names: &[String]) -> String {
    if names.is_empty() {
        "No streamers available.".to_string()
    } else {
        names.join(", ")
    }
}

pub fn stream_status(status: &StreamStatus) -> String {
    match &status.live {
        Some(live) => live_summary(live),
        None => format!("\"{}\" is offline.", status.channel),
    }
}

fn live_summary(live: &LiveStream) -> String {
    let display = if live.display_name.is_empty() {
        &live.user_login
    } else {
        &live.display_name
    };

    let mut lines = vec![
        format!("\"{display}\" is live on Twitch."),
        String::new(),
        format!("Category: {}", live.category),
        format!("Title: {}", live.title),
        format!("Viewers: {}", live.viewer_count),
        format!("URL: {}", live.url),
    ];
    if !live.thumbnail_url.is_empty() {
        lines.push(format!("Thumbnail: {}", live.thumbnail_url));
    }
    if let Some(started_at) = live.started_at {
        lines.push(format!(
            "Live since: {}",
            started_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    lines.join("\n")
}

/// Summary of a batch lookup over the registry.
///
/// Channels whose lookup failed count as not live and are named on a
/// separate line.
pub fn live_list(results: &[ChannelStatus]) -> String {
    if results.is_empty() {
        return "No streamers in the list.".to_string();
    }

    let live: Vec<&str> = results
        .iter()
        .filter(|r| r.is_live())
        .map(|r| r.channel.as_str())
        .collect();
    let unchecked: Vec<&str> = results
        .iter()
        .filter(|r| r.outcome.is_err())
        .map(|r| r.channel.as_str())
        .collect();

    let mut text = if live.is_empty() {
        "No one is live right now.".to_string()
    } else {
        format!("Streamers currently live: {}", live.join(", "))
    };
    if !unchecked.is_empty() {
        text.push_str(&format!("\nCould not check: {}", unchecked.join(", ")));
    }
    text
}

fn already_exists(name: &str) -> String {
    format!("Streamer \"{name}\" already exists.")
}

fn not_found(name: &str) -> String {
    format!("Streamer \"{name}\" not found.")
}
