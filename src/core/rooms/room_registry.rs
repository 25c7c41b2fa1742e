use dashmap::DashSet;

/// In-memory set of channels where the relay answers ordinary messages.
///
/// Membership is the sole authority for "is relay active here". The set is
/// created empty at startup, shared across handlers via `Arc`, and not
/// persisted across restarts. `DashSet` keeps each operation atomic, which
/// is all the coordination concurrent event handlers need.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashSet<u64>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a channel relay-active. Idempotent.
    pub fn add_room(&self, channel_id: u64) {
        self.rooms.insert(channel_id);
    }

    /// Marks a channel inactive. Removing an absent channel is a no-op.
    pub fn remove_room(&self, channel_id: u64) {
        self.rooms.remove(&channel_id);
    }

    pub fn is_active(&self, channel_id: u64) -> bool {
        self.rooms.contains(&channel_id)
    }

    /// Snapshot of the active channels, in arbitrary order.
    pub fn list_rooms(&self) -> Vec<u64> {
        self.rooms.iter().map(|id| *id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
