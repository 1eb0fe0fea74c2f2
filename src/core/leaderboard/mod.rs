//! Leaderboard tab: ranks players by deposits and renders the paginated tab.
//!
//! `build_tab` is pure: it only sees the summary snapshot, a name resolver and
//! a message lookup, and never fails.

use num_format::{Locale, ToFormattedString};

use crate::core::lang::{self, keys};
use crate::core::server_info::{Page, TabFragment, TabLayout};
use crate::core::summary::DepositSummary;

/// Number of players shown.
pub const MAX_RANKED: usize = 40;
/// Text lines per page.
pub const LINES_PER_PAGE: usize = 23;
/// Pages in the tab. Lines past `PAGE_COUNT * LINES_PER_PAGE` are dropped.
pub const PAGE_COUNT: usize = 2;

/// A player's place on the leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedEntry {
    /// 1-based.
    pub rank: usize,
    pub player_id: String,
    pub display_name: String,
    pub total_deposited: u64,
    /// Share of the grand total, 0..=100. Zero when nothing was deposited.
    pub percentage: f64,
}

impl RankedEntry {
    /// `"{rank}. {name} - {total} ({percentage}%)"`
    pub fn line(&self) -> String {
        format!(
            "{}. {} - {} ({:.2}%)",
            self.rank,
            self.display_name,
            group_thousands(self.total_deposited),
            self.percentage
        )
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Top `MAX_RANKED` players by deposits, highest first. Ties keep summary order.
pub fn rank_entries<N>(summary: &DepositSummary, resolve_name: N) -> Vec<RankedEntry>
where
    N: Fn(&str) -> Option<String>,
{
    let grand_total = summary.grand_total();
    let mut sorted: Vec<_> = summary.iter().collect();
    // sort_by is stable, so equal totals stay in document order
    sorted.sort_by(|(_, a), (_, b)| b.total_deposited.cmp(&a.total_deposited));

    sorted
        .into_iter()
        .take(MAX_RANKED)
        .enumerate()
        .map(|(i, (player_id, record))| {
            let percentage = if grand_total > 0 {
                record.total_deposited as f64 / grand_total as f64 * 100.0
            } else {
                0.0
            };
            RankedEntry {
                rank: i + 1,
                player_id: player_id.to_string(),
                display_name: resolve_name(player_id).unwrap_or_else(|| player_id.to_string()),
                total_deposited: record.total_deposited,
                percentage,
            }
        })
        .collect()
}

/// Two title lines, a blank line, then one line per entry.
pub fn render_lines<L>(entries: &[RankedEntry], grand_total: u64, localize: L) -> Vec<String>
where
    L: Fn(&str) -> String,
{
    let total = group_thousands(grand_total);
    let mut lines = Vec::with_capacity(entries.len() + 3);
    lines.push(localize(keys::TITLE_LINE_1));
    lines.push(lang::fill(&localize(keys::TITLE_LINE_2), &[&total]));
    lines.push(String::new());
    lines.extend(entries.iter().map(RankedEntry::line));
    lines
}

/// Split lines into exactly `PAGE_COUNT` pages of at most `LINES_PER_PAGE`
/// lines. Short content leaves trailing pages empty.
pub fn paginate(lines: &[String]) -> Vec<Page> {
    let kept = PAGE_COUNT * LINES_PER_PAGE;
    if lines.len() > kept {
        log::warn!(
            "Leaderboard has {} lines, only the first {} fit on {} pages",
            lines.len(),
            kept,
            PAGE_COUNT
        );
    }
    (0..PAGE_COUNT)
        .map(|page| {
            let start = (page * LINES_PER_PAGE).min(lines.len());
            let end = (start + LINES_PER_PAGE).min(lines.len());
            Page::with_lines(lines[start..end].to_vec())
        })
        .collect()
}

/// Build the complete leaderboard tab from a summary snapshot.
pub fn build_tab<N, L>(summary: &DepositSummary, resolve_name: N, localize: L) -> TabFragment
where
    N: Fn(&str) -> Option<String>,
    L: Fn(&str) -> String,
{
    if summary.is_empty() {
        log::info!("Deposit summary is empty, leaderboard shows the header only");
    }
    let grand_total = summary.grand_total();
    let entries = rank_entries(summary, resolve_name);
    for e in &entries {
        log::debug!(
            "#{} {} ({}) {}",
            e.rank,
            e.display_name,
            e.player_id,
            e.total_deposited
        );
    }
    log::info!(
        "Ranked {} of {} player(s), {} deposited in total",
        entries.len(),
        summary.len(),
        grand_total
    );

    let lines = render_lines(&entries, grand_total, &localize);
    TabFragment {
        button_text: localize(keys::BUTTON_TEXT),
        header_text: localize(keys::HEADER_TEXT),
        pages: paginate(&lines),
        layout: TabLayout::LEADERBOARD,
    }
}
