use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DiscId;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &S, id: DiscId) -> Result<CmdResult> {
    match store.find(id) {
        Some(disc) => Ok(CmdResult::default().with_listed_discs(vec![disc.clone()])),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!("Disc {} not found", id)));
            Ok(result)
        }
    }
}
