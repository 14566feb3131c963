use crate::commands::{add, CmdResult};
use crate::error::Result;
use crate::model::DiscDraft;
use crate::store::CatalogStore;

/// A small demo library: two open discs and one finalized ISO.
pub fn sample_library() -> Vec<DiscDraft> {
    vec![
        DiscDraft::new("Album 1", 700.0, 52, 250.0).with_sessions(1, "music"),
        DiscDraft::new("Windows XP ISO", 700.0, 24, 680.0).with_sessions(1, "finalized"),
        DiscDraft::new("My Backups", 800.0, 52, 150.0).with_sessions(3, "data"),
    ]
}

pub fn run<S: CatalogStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for draft in sample_library() {
        let added = add::run(store, draft)?;
        result.affected_discs.extend(added.affected_discs);
        result.messages.extend(added.messages);
    }
    Ok(result)
}
