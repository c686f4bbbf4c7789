//! Core data types for the `SiteSafe` monitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Worker identifier type (tracker-assigned)
pub type WorkerId = i32;

/// A recorded safety violation, one row in the event log
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViolationEvent {
    /// Unique identifier (assigned by the database on insert)
    pub id: Option<i64>,

    /// When the violation was observed
    pub timestamp: DateTime<Utc>,

    /// Display name of the tracked person (e.g. "Worker 3")
    #[validate(length(min = 1, max = 255))]
    pub person_name: String,

    /// Comma-joined violation labels (e.g. "Helmet,Vest")
    #[validate(length(min = 1, max = 512))]
    pub violation_type: String,

    /// Path to the alert snapshot image, if one was saved
    pub snapshot_path: Option<String>,
}

impl ViolationEvent {
    /// Build an event from a set of violation labels, joined with commas
    #[must_use]
    pub fn from_labels(person_name: impl Into<String>, labels: &[String]) -> Self {
        Self {
            id: None,
            timestamp: Utc::now(),
            person_name: person_name.into(),
            violation_type: labels.join(","),
            snapshot_path: None,
        }
    }

    /// Split the stored comma-joined labels back into a list
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.violation_type
            .split(',')
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Axis-aligned bounding box in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

impl BoundingBox {
    /// Construct a box from corner coordinates
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box area (zero for degenerate boxes)
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    /// Center point (x, y)
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Whether the point lies inside the box (inclusive)
    #[must_use]
    pub fn contains(&self, point: Keypoint) -> bool {
        self.x1 <= point.x && point.x <= self.x2 && self.y1 <= point.y && point.y <= self.y2
    }

    /// Intersection-over-union with another box
    #[must_use]
    pub fn iou(&self, other: &Self) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        let inter_area = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);

        inter_area / (self.area() + other.area() - inter_area + 1e-6)
    }
}

/// A single pose keypoint in image coordinates
///
/// Non-detected keypoints are reported at the origin by the pose model,
/// so a coordinate greater than zero means "visible".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Keypoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Keypoint {
    /// Construct a keypoint
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether the keypoint was detected at all
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.x > 0.0 && self.y > 0.0
    }
}

/// Number of keypoints in the COCO pose layout
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// COCO-layout pose keypoints for one person
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PoseKeypoints {
    /// All 17 keypoints in COCO order
    pub points: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PoseKeypoints {
    const NOSE: usize = 0;
    const L_SHOULDER: usize = 5;
    const R_SHOULDER: usize = 6;
    const L_WRIST: usize = 9;
    const R_WRIST: usize = 10;
    const L_HIP: usize = 11;
    const R_HIP: usize = 12;
    const L_ANKLE: usize = 15;
    const R_ANKLE: usize = 16;

    /// Construct from a full keypoint array
    #[must_use]
    pub const fn new(points: [Keypoint; COCO_KEYPOINT_COUNT]) -> Self {
        Self { points }
    }

    fn get(&self, index: usize) -> Keypoint {
        self.points.get(index).copied().unwrap_or_default()
    }

    /// Nose keypoint
    #[must_use]
    pub fn nose(&self) -> Keypoint {
        self.get(Self::NOSE)
    }

    /// Left shoulder keypoint
    #[must_use]
    pub fn left_shoulder(&self) -> Keypoint {
        self.get(Self::L_SHOULDER)
    }

    /// Right shoulder keypoint
    #[must_use]
    pub fn right_shoulder(&self) -> Keypoint {
        self.get(Self::R_SHOULDER)
    }

    /// Left wrist keypoint
    #[must_use]
    pub fn left_wrist(&self) -> Keypoint {
        self.get(Self::L_WRIST)
    }

    /// Right wrist keypoint
    #[must_use]
    pub fn right_wrist(&self) -> Keypoint {
        self.get(Self::R_WRIST)
    }

    /// Left hip keypoint
    #[must_use]
    pub fn left_hip(&self) -> Keypoint {
        self.get(Self::L_HIP)
    }

    /// Right hip keypoint
    #[must_use]
    pub fn right_hip(&self) -> Keypoint {
        self.get(Self::R_HIP)
    }

    /// Left ankle keypoint
    #[must_use]
    pub fn left_ankle(&self) -> Keypoint {
        self.get(Self::L_ANKLE)
    }

    /// Right ankle keypoint
    #[must_use]
    pub fn right_ankle(&self) -> Keypoint {
        self.get(Self::R_ANKLE)
    }
}

/// Detector class enumeration
///
/// Class ids match the gear detection model's training layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearClass {
    /// A person
    Person,
    /// Hard hat / helmet
    Helmet,
    /// High-visibility vest
    Vest,
    /// Safety goggles
    Goggles,
    /// Safety boots
    Boots,
}

impl GearClass {
    /// Map a raw detector class id to a gear class
    #[must_use]
    pub const fn from_class_id(class_id: i32) -> Option<Self> {
        match class_id {
            0 => Some(Self::Person),
            1 => Some(Self::Helmet),
            2 => Some(Self::Vest),
            3 => Some(Self::Goggles),
            4 => Some(Self::Boots),
            _ => None,
        }
    }

    /// The raw detector class id
    #[must_use]
    pub const fn class_id(self) -> i32 {
        match self {
            Self::Person => 0,
            Self::Helmet => 1,
            Self::Vest => 2,
            Self::Goggles => 3,
            Self::Boots => 4,
        }
    }

    /// Human-readable gear label, as stored in violation events
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Helmet => "Helmet",
            Self::Vest => "Vest",
            Self::Goggles => "Goggles",
            Self::Boots => "Boots",
        }
    }
}

impl std::fmt::Display for GearClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single gear detection produced by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearDetection {
    /// Detected class
    pub class: GearClass,

    /// Detector confidence (0.0-1.0)
    pub confidence: f32,

    /// Detection bounding box
    pub bbox: BoundingBox,
}

/// Result of a compliance check for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComplianceReport {
    /// Whether the person is fully compliant
    pub is_compliant: bool,

    /// Gear the person is missing ("Helmet", "Vest", ...)
    pub missing_gear: Vec<String>,

    /// Behavioral violations ("Carrying Helmet", ...)
    pub violations: Vec<String>,
}

impl ComplianceReport {
    /// All violation labels, missing gear first
    #[must_use]
    pub fn all_labels(&self) -> Vec<String> {
        self.missing_gear
            .iter()
            .chain(self.violations.iter())
            .cloned()
            .collect()
    }
}
