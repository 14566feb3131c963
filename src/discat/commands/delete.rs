use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DiscId;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &mut S, ids: &[DiscId]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        let Some(disc) = store.find(id).cloned() else {
            result.add_message(CmdMessage::warning(format!("Disc {} not found", id)));
            continue;
        };
        if store.delete(id) {
            result.add_message(CmdMessage::success(format!(
                "Disc deleted ({}): {}",
                id,
                disc.name()
            )));
            result.affected_discs.push(disc);
        }
    }

    Ok(result)
}
