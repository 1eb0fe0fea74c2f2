//! Replace-by-key splicing of tabs into `settings.Tabs`.

use crate::core::server_info::Tab;

/// Remove every tab sharing `new_tab`'s `ButtonText`, then append `new_tab`.
///
/// All matches are removed, not just the first, so duplicates left behind by
/// older versions are cleaned up. The remaining tabs keep their order.
pub fn replace_tab(tabs: Vec<Tab>, new_tab: Tab) -> Vec<Tab> {
    let mut out = Vec::with_capacity(tabs.len() + 1);
    for (index, tab) in tabs.into_iter().enumerate() {
        if tab.button_text() == new_tab.button_text() {
            log::info!(
                "Removed existing {} tab at index {}",
                new_tab.button_text(),
                index
            );
        } else {
            out.push(tab);
        }
    }
    out.push(new_tab);
    out
}
