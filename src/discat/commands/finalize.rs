use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DiscId;
use crate::store::CatalogStore;

pub fn set_finalized<S: CatalogStore>(
    store: &mut S,
    id: DiscId,
    finalized: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(disc) = store.find_mut(id) else {
        result.add_message(CmdMessage::warning(format!("Disc {} not found", id)));
        return Ok(result);
    };
    disc.set_finalized(finalized);

    let verb = if finalized { "finalized" } else { "reopened" };
    result.add_message(CmdMessage::success(format!(
        "Disc {} ({}): {} [{}]",
        verb,
        id,
        disc.name(),
        disc.session_type()
    )));
    result.affected_discs.push(disc.clone());

    Ok(result)
}
