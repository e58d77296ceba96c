use serde::{Deserialize, Serialize};

/// A moving reflector seen by the radar. Speeds are closing speeds along boresight;
/// zero means the target gives no Doppler return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: u32,
    pub radial_speed_kmh: f64,
}

impl Target {
    pub fn new(id: u32, radial_speed_kmh: f64) -> Target {
        Target { id, radial_speed_kmh }
    }

    pub fn is_moving(&self) -> bool {
        self.radial_speed_kmh > 0.
    }

    // Whether the radar sees a Doppler return from this target at all.
    pub fn has_return(&self) -> bool {
        self.radial_speed_kmh.is_finite() && self.is_moving()
    }
}

/// An ordered snapshot of the targets in view. The caller owns the list; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene(pub Vec<Target>);

impl Scene {
    pub fn targets(&self) -> &[Target] {
        &self.0
    }

    pub fn from_json(json: &str) -> serde_json::Result<Scene> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Target>> for Scene {
    fn from(targets: Vec<Target>) -> Self {
        Scene(targets)
    }
}

// The fastest target with a Doppler return. Ties go to whichever comes first.
pub fn dominant_target(targets: &[Target]) -> Option<&Target> {
    targets.iter().filter(|t| t.has_return()).fold(None, |best: Option<&Target>, tgt| match best {
        Some(b) if b.radial_speed_kmh >= tgt.radial_speed_kmh => Some(b),
        _ => Some(tgt),
    })
}
