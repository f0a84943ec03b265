use glam::Vec2;

/// Default per-agent speed cap (units per tick).
pub const DEFAULT_MAX_SPEED: f32 = 2.0;
/// Default steering force cap per behavior.
pub const DEFAULT_MAX_FORCE: f32 = 0.1;

/// A pooled, steerable point entity.
///
/// Agents are never allocated individually — the pool owns every slot and
/// agents are only ever activated/deactivated in place.
#[derive(Debug, Clone, Copy)]
pub struct Agent {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub active: bool,
    /// Carrying state: true after touching a source, false after a sink.
    pub carrying: bool,
    /// Bucket this agent landed in at the last hash rebuild
    /// (`u32::MAX` when the insert was dropped).
    pub cell: u32,
    // Last-computed flocking components. Written every tick so the debug
    // overlay can draw force vectors — a documented side channel, not
    // incidental state.
    pub last_alignment: Vec2,
    pub last_cohesion: Vec2,
    pub last_separation: Vec2,
}

impl Agent {
    fn inactive(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            active: false,
            carrying: false,
            cell: u32::MAX,
            last_alignment: Vec2::ZERO,
            last_cohesion: Vec2::ZERO,
            last_separation: Vec2::ZERO,
        }
    }
}

/// Fixed-capacity agent pool with swap-removal.
///
/// Invariant: slots `[0, active_count)` are exactly the active agents.
/// Order is unspecified and changes on removal, so callers must not cache
/// "agent at index i" across pool mutations.
pub struct AgentPool {
    slots: Vec<Agent>,
    active_count: usize,
    next_id: u32,
}

impl AgentPool {
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|i| Agent::inactive(i as u32)).collect();
        Self {
            slots,
            active_count: 0,
            next_id: 0,
        }
    }

    /// Activate the next free slot at `pos` with zeroed kinematics.
    /// Returns `None` when the pool is exhausted — a normal, checkable
    /// outcome, not an error.
    pub fn spawn(&mut self, pos: Vec2) -> Option<&mut Agent> {
        if self.active_count >= self.slots.len() {
            return None;
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let agent = &mut self.slots[self.active_count];
        *agent = Agent::inactive(id);
        agent.pos = pos;
        agent.active = true;
        self.active_count += 1;
        Some(agent)
    }

    /// Deactivate the agent at `index` by swapping the last active agent
    /// into its slot. O(1); invalidates external notions of "agent at i".
    pub fn remove(&mut self, index: usize) {
        if index >= self.active_count {
            return;
        }
        self.active_count -= 1;
        self.slots.swap(index, self.active_count);
        self.slots[self.active_count].active = false;
    }

    /// Deactivate everything. Storage is retained for reuse.
    pub fn clear(&mut self) {
        for agent in &mut self.slots[..self.active_count] {
            agent.active = false;
        }
        self.active_count = 0;
    }

    /// The active slice, valid until the next pool mutation.
    pub fn active(&self) -> &[Agent] {
        &self.slots[..self.active_count]
    }

    pub fn active_mut(&mut self) -> &mut [Agent] {
        &mut self.slots[..self.active_count]
    }

    pub fn len(&self) -> usize {
        self.active_count
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
