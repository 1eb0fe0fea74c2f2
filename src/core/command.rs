//! The `updateleaderboard` command: permission check, regenerate, read,
//! build, splice, write, reload.
//!
//! The document is only written once every earlier step succeeded, so an
//! error leaves `ServerInfo.json` as it was. Concurrent runs are not
//! coordinated: the last writer wins.

use crate::core::error::LeaderboardError;
use crate::core::hooks::Hooks;
use crate::core::lang::Lang;
use crate::core::leaderboard;
use crate::core::permissions::{Admins, Caller};
use crate::core::players::PlayerDirectory;
use crate::core::server_info::{ConfigStore, Tab, TabFragment};
use crate::core::summary::{DepositSummary, SummaryStore};
use crate::core::tabs;

/// Reply sent to the caller after a successful update.
pub const SUCCESS_REPLY: &str = "✅ Leaderboard updated and ServerInfo reloaded!";

/// Collaborators of one command invocation.
pub struct UpdateLeaderboard<'a, S, C> {
    pub summary: &'a S,
    pub server_info: &'a C,
    pub players: &'a PlayerDirectory,
    pub lang: &'a Lang,
    pub admins: &'a Admins,
    pub hooks: &'a Hooks,
}

/// What an update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub ranked: usize,
    pub tabs: usize,
}

impl<S, C> UpdateLeaderboard<'_, S, C>
where
    S: SummaryStore,
    C: ConfigStore,
{
    fn build(&self, summary: &DepositSummary) -> TabFragment {
        leaderboard::build_tab(
            summary,
            |id| self.players.resolve(id),
            |key| self.lang.get(key),
        )
    }

    /// Build the tab from the current summary without touching anything.
    pub fn preview(&self) -> Result<TabFragment, LeaderboardError> {
        let summary = self.summary.read_summary()?;
        Ok(self.build(&summary))
    }

    /// Run the full update for `caller`.
    pub fn run(&self, caller: &Caller) -> Result<UpdateOutcome, LeaderboardError> {
        if !self.admins.is_admin(caller) {
            log::warn!("Rejected leaderboard update from {}", caller);
            return Err(LeaderboardError::PermissionDenied);
        }
        log::info!("Leaderboard update requested by {}", caller);

        self.hooks.regenerate_summary();

        let mut document = self.server_info.read_config()?;
        let summary = self.summary.read_summary()?;
        let tab = Tab::from_fragment(&self.build(&summary))?;
        let ranked = summary.len().min(leaderboard::MAX_RANKED);

        let existing = document.take_tabs();
        document.set_tabs(tabs::replace_tab(existing, tab));
        self.server_info.write_config(&document)?;
        log::info!("ServerInfo updated with {} page leaderboard", leaderboard::PAGE_COUNT);

        self.hooks.trigger_reload();

        Ok(UpdateOutcome {
            ranked,
            tabs: document.tabs().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::lang::DEFAULT_LOCALE;
    use crate::core::server_info::ServerInfo;

    struct MemorySummary(Result<DepositSummary, String>);

    impl SummaryStore for MemorySummary {
        fn read_summary(&self) -> Result<DepositSummary, LeaderboardError> {
            self.0
                .clone()
                .map_err(LeaderboardError::Computation)
        }
    }

    struct MemoryConfig {
        document: RefCell<ServerInfo>,
        writes: RefCell<usize>,
    }

    impl MemoryConfig {
        fn new(raw: &str) -> Self {
            Self {
                document: RefCell::new(ServerInfo::from_json_str(raw).unwrap()),
                writes: RefCell::new(0),
            }
        }
    }

    impl ConfigStore for MemoryConfig {
        fn read_config(&self) -> Result<ServerInfo, LeaderboardError> {
            Ok(self.document.borrow().clone())
        }

        fn write_config(&self, document: &ServerInfo) -> Result<(), LeaderboardError> {
            *self.document.borrow_mut() = document.clone();
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }

    const DOC: &str = r#"{"settings":{"Tabs":[
        {"ButtonText":"Leaderboard","HeaderText":"stale","Pages":[]},
        {"ButtonText":"Rules","HeaderText":"Rules","Pages":[]},
        {"ButtonText":"Leaderboard","HeaderText":"stale duplicate","Pages":[]}
    ]}}"#;

    fn summary() -> MemorySummary {
        MemorySummary(Ok(DepositSummary::from_json_str(
            r#"{"A":{"total_deposited":100},"B":{"total_deposited":300}}"#,
        )
        .unwrap()))
    }

    fn run_with(
        summary: &MemorySummary,
        config: &MemoryConfig,
        admins: &Admins,
        caller: &Caller,
    ) -> Result<UpdateOutcome, LeaderboardError> {
        let players: PlayerDirectory = [("B".to_string(), "Bob".to_string())]
            .into_iter()
            .collect();
        let lang = Lang::builtin(DEFAULT_LOCALE);
        let hooks = Hooks::default();
        UpdateLeaderboard {
            summary,
            server_info: config,
            players: &players,
            lang: &lang,
            admins,
            hooks: &hooks,
        }
        .run(caller)
    }

    #[test]
    fn console_update_replaces_stale_tabs() {
        let config = MemoryConfig::new(DOC);
        let outcome = run_with(&summary(), &config, &Admins::default(), &Caller::Console).unwrap();

        assert_eq!(outcome, UpdateOutcome { ranked: 2, tabs: 2 });
        assert_eq!(*config.writes.borrow(), 1);
        let doc = config.document.borrow();
        let buttons: Vec<_> = doc.tabs().iter().map(Tab::button_text).collect();
        assert_eq!(buttons, vec!["Rules", "Leaderboard"]);
        let lines = &doc.tabs()[1].get("Pages").unwrap()[0]["TextLines"];
        assert_eq!(lines[3], "1. Bob - 300 (75.00%)");
        assert_eq!(lines[4], "2. A - 100 (25.00%)");
    }

    #[test]
    fn partially_specified_tab_survives_update() {
        let raw = r#"{"settings":{"Tabs":[
            {"ButtonText":"Rules","Pages":[]},
            {"TextFontSize":16.0,"ButtonText":"Shop","OxideGroup":null}
        ]}}"#;
        let before: serde_json::Value = serde_json::from_str(raw).unwrap();
        let config = MemoryConfig::new(raw);
        run_with(&summary(), &config, &Admins::default(), &Caller::Console).unwrap();

        let after = config.document.borrow().to_value();
        let tabs = after["settings"]["Tabs"].as_array().unwrap();
        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs[0], before["settings"]["Tabs"][0]);
        assert_eq!(tabs[1], before["settings"]["Tabs"][1]);
        assert_eq!(
            serde_json::to_string(&tabs[..2]).unwrap(),
            r#"[{"ButtonText":"Rules","Pages":[]},{"TextFontSize":16.0,"ButtonText":"Shop","OxideGroup":null}]"#
        );
    }

    #[test]
    fn repeated_updates_keep_one_leaderboard() {
        let config = MemoryConfig::new(DOC);
        let s = summary();
        run_with(&s, &config, &Admins::default(), &Caller::Console).unwrap();
        let first = config.document.borrow().clone();
        run_with(&s, &config, &Admins::default(), &Caller::Console).unwrap();
        assert_eq!(*config.document.borrow(), first);
    }

    #[test]
    fn non_admin_is_rejected_without_writing() {
        let config = MemoryConfig::new(DOC);
        let err = run_with(
            &summary(),
            &config,
            &Admins::parse("765"),
            &Caller::Player("999".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, LeaderboardError::PermissionDenied));
        assert_eq!(*config.writes.borrow(), 0);
    }

    #[test]
    fn listed_admin_may_update() {
        let config = MemoryConfig::new(DOC);
        run_with(
            &summary(),
            &config,
            &Admins::parse("765"),
            &Caller::Player("765".to_string()),
        )
        .unwrap();
        assert_eq!(*config.writes.borrow(), 1);
    }

    #[test]
    fn summary_error_leaves_document_untouched() {
        let config = MemoryConfig::new(DOC);
        let broken = MemorySummary(Err("player x has no total_deposited value".to_string()));
        let err = run_with(&broken, &config, &Admins::default(), &Caller::Console).unwrap_err();
        assert!(matches!(err, LeaderboardError::Computation(_)));
        assert_eq!(*config.writes.borrow(), 0);
        assert_eq!(config.document.borrow().tabs().len(), 3);
    }
}
