//! IDs of records with a server round-trip outstanding.

use std::collections::HashSet;

use shared::RecordId;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    pub creating: bool,
    updating: HashSet<RecordId>,
    deleting: HashSet<RecordId>,
}

impl InFlight {
    /// Claim `id` for an edit. A record already being edited or deleted is refused.
    pub fn start_update(&mut self, id: RecordId) -> ClientResult<()> {
        if self.is_busy(id) {
            return Err(ClientError::RecordBusy(id));
        }
        self.updating.insert(id);
        Ok(())
    }

    pub fn finish_update(&mut self, id: RecordId) {
        self.updating.remove(&id);
    }

    /// Claim `id` for a delete. A record already being edited or deleted is refused.
    pub fn start_delete(&mut self, id: RecordId) -> ClientResult<()> {
        if self.is_busy(id) {
            return Err(ClientError::RecordBusy(id));
        }
        self.deleting.insert(id);
        Ok(())
    }

    pub fn finish_delete(&mut self, id: RecordId) {
        self.deleting.remove(&id);
    }

    pub fn is_updating(&self, id: RecordId) -> bool {
        self.updating.contains(&id)
    }

    pub fn is_deleting(&self, id: RecordId) -> bool {
        self.deleting.contains(&id)
    }

    pub fn is_busy(&self, id: RecordId) -> bool {
        self.is_updating(id) || self.is_deleting(id)
    }

    pub fn updating(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.updating.iter().copied()
    }

    pub fn deleting(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.deleting.iter().copied()
    }

    pub fn is_idle(&self) -> bool {
        !self.creating && self.updating.is_empty() && self.deleting.is_empty()
    }
}
