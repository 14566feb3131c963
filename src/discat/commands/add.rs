use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DiscDraft;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &mut S, draft: DiscDraft) -> Result<CmdResult> {
    let added = store.add(draft)?;
    let mut result = CmdResult::default();

    if let Some(correction) = added.correction {
        result.add_message(CmdMessage::warning(correction.to_string()));
    }

    if let Some(disc) = store.find(added.id) {
        result.add_message(CmdMessage::success(format!(
            "Disc added ({}): {}",
            disc.id(),
            disc.name()
        )));
        result.affected_discs.push(disc.clone());
    }

    Ok(result)
}
