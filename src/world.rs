use glam::Vec2;

/// Default radius for resources placed via the tool surface.
const RESOURCE_RADIUS: f32 = 12.0;

// ---------------------------------------------------------------------------
// Obstacles
// ---------------------------------------------------------------------------

/// A static circular blocker agents steer around.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
}

/// Obstacle list with the erase-brush command surface.
pub struct Obstacles {
    pub list: Vec<Obstacle>,
}

impl Obstacles {
    pub fn new() -> Self {
        Self {
            list: Vec::with_capacity(16),
        }
    }

    pub fn add(&mut self, x: f32, y: f32, radius: f32) {
        self.list.push(Obstacle {
            pos: Vec2::new(x, y),
            radius,
        });
    }

    /// Remove every obstacle whose center is under the circular brush.
    pub fn erase_within(&mut self, x: f32, y: f32, radius: f32) {
        let brush = Vec2::new(x, y);
        let r2 = radius * radius;
        self.list.retain(|o| o.pos.distance_squared(brush) > r2);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// What touching the resource does to an agent's carrying state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Picking a resource up: seeking -> carrying.
    Source,
    /// Dropping it off: carrying -> seeking.
    Sink,
}

/// A static circular pickup/dropoff site.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: ResourceKind,
}

/// Resource list with the same command surface as obstacles.
pub struct Resources {
    pub list: Vec<Resource>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            list: Vec::with_capacity(16),
        }
    }

    pub fn add(&mut self, kind: ResourceKind, x: f32, y: f32) {
        self.list.push(Resource {
            pos: Vec2::new(x, y),
            radius: RESOURCE_RADIUS,
            kind,
        });
    }

    pub fn erase_within(&mut self, x: f32, y: f32, radius: f32) {
        let brush = Vec2::new(x, y);
        let r2 = radius * radius;
        self.list.retain(|r| r.pos.distance_squared(brush) > r2);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }
}
