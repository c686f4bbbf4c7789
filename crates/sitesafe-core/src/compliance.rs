//! Geometric PPE compliance checks
//!
//! Decides whether a tracked person is wearing the required gear by relating
//! gear detections to the person's pose keypoints and bounding box. All
//! decisions are pure geometry over detector output; no inference happens
//! here.

use crate::types::{BoundingBox, ComplianceReport, GearClass, GearDetection, PoseKeypoints};

/// Vertical margin below the head within which a helmet counts as worn
const HELMET_HEAD_MARGIN: f32 = 40.0;

/// Minimum torso/vest overlap for a vest to count as worn
const VEST_IOU_THRESHOLD: f32 = 0.05;

/// Fraction of the person box height that bounds the vest fallback zone
const VEST_FALLBACK_ZONE: f32 = 0.6;

/// Minimum feet/boot overlap for boots to count as worn
const BOOT_IOU_THRESHOLD: f32 = 0.05;

/// Padding around the ankles when building the feet box
const FEET_PADDING: f32 = 60.0;

/// Minimum head/goggles overlap for goggles to count as worn
const GOGGLE_IOU_THRESHOLD: f32 = 0.01;

/// Half-size of the head box centered on the nose
const HEAD_BOX_RADIUS: f32 = 30.0;

/// Confidence floor for person and helmet detections
const PRIMARY_CONFIDENCE: f32 = 0.5;

/// Confidence floor for small gear detections (vest, goggles, boots)
const GEAR_CONFIDENCE: f32 = 0.25;

/// Drop low-confidence detections before the compliance check
///
/// Person and helmet detections are large and reliable, so they need a higher
/// confidence; small gear is kept at a lower floor to avoid false "missing
/// gear" reports.
#[must_use]
pub fn filter_detections(detections: &[GearDetection]) -> Vec<GearDetection> {
    detections
        .iter()
        .filter(|d| {
            let floor = match d.class {
                GearClass::Person | GearClass::Helmet => PRIMARY_CONFIDENCE,
                GearClass::Vest | GearClass::Goggles | GearClass::Boots => GEAR_CONFIDENCE,
            };
            d.confidence >= floor
        })
        .copied()
        .collect()
}

/// Check one person's PPE compliance against a set of gear detections
///
/// `person_box` is the person's bounding box, `keypoints` the person's pose,
/// and `gear` the (already confidence-filtered) gear detections for the
/// frame. Body parts whose keypoints were not detected are skipped rather
/// than reported as violations.
#[must_use]
pub fn check_compliance(
    person_box: BoundingBox,
    keypoints: &PoseKeypoints,
    gear: &[GearDetection],
) -> ComplianceReport {
    let mut missing_gear = Vec::new();
    let mut violations = Vec::new();

    check_helmet(person_box, keypoints, gear, &mut missing_gear, &mut violations);
    check_vest(person_box, keypoints, gear, &mut missing_gear);
    check_boots(keypoints, gear, &mut missing_gear);
    check_goggles(keypoints, gear, &mut missing_gear);

    let is_compliant = missing_gear.is_empty() && violations.is_empty();

    ComplianceReport {
        is_compliant,
        missing_gear,
        violations,
    }
}

/// Helmet: worn when a helmet sits at head height inside the person box.
/// A helmet held in a hand counts as carried, which is its own violation.
fn check_helmet(
    person_box: BoundingBox,
    keypoints: &PoseKeypoints,
    gear: &[GearDetection],
    missing_gear: &mut Vec<String>,
    violations: &mut Vec<String>,
) {
    let nose = keypoints.nose();
    let head_y = if nose.y > 0.0 { nose.y } else { person_box.y1 };

    let mut helmet_worn = false;
    let mut helmet_carried = false;

    for helmet in gear.iter().filter(|d| d.class == GearClass::Helmet) {
        let (center_x, center_y) = helmet.bbox.center();

        if center_y < head_y + HELMET_HEAD_MARGIN
            && person_box.x1 < center_x
            && center_x < person_box.x2
        {
            helmet_worn = true;
        }

        let l_wrist = keypoints.left_wrist();
        let r_wrist = keypoints.right_wrist();
        if (l_wrist.x > 0.0 && helmet.bbox.contains(l_wrist))
            || (r_wrist.x > 0.0 && helmet.bbox.contains(r_wrist))
        {
            helmet_carried = true;
        }
    }

    if !helmet_worn {
        missing_gear.push("Helmet".to_string());
        if helmet_carried {
            violations.push("Carrying Helmet".to_string());
        }
    }
}

/// Vest: matched against a torso box built from shoulders and hips; when the
/// torso keypoints are missing, fall back to a vertical zone in the upper
/// part of the person box.
fn check_vest(
    person_box: BoundingBox,
    keypoints: &PoseKeypoints,
    gear: &[GearDetection],
    missing_gear: &mut Vec<String>,
) {
    let l_shoulder = keypoints.left_shoulder();
    let r_shoulder = keypoints.right_shoulder();
    let l_hip = keypoints.left_hip();
    let r_hip = keypoints.right_hip();

    let mut vest_worn = false;
    let vests = gear.iter().filter(|d| d.class == GearClass::Vest);

    if l_shoulder.x > 0.0 && r_hip.x > 0.0 {
        let torso_box = BoundingBox::new(
            l_shoulder.x.min(r_shoulder.x),
            l_shoulder.y.min(r_shoulder.y),
            l_hip.x.max(r_hip.x),
            l_hip.y.max(r_hip.y),
        );

        for vest in vests {
            if vest.bbox.iou(&torso_box) > VEST_IOU_THRESHOLD {
                vest_worn = true;
                break;
            }
        }
    } else {
        let zone_bottom = person_box.y1 + (person_box.y2 - person_box.y1) * VEST_FALLBACK_ZONE;
        for vest in vests {
            let (_, center_y) = vest.bbox.center();
            if person_box.y1 < center_y && center_y < zone_bottom {
                vest_worn = true;
                break;
            }
        }
    }

    if !vest_worn {
        missing_gear.push("Vest".to_string());
    }
}

/// Boots: only judged when at least one ankle is visible; the feet box is the
/// ankle extent padded on all sides.
fn check_boots(keypoints: &PoseKeypoints, gear: &[GearDetection], missing_gear: &mut Vec<String>) {
    let ankles = [keypoints.left_ankle(), keypoints.right_ankle()];

    if !ankles.iter().any(|a| a.x > 0.0) {
        return;
    }

    let xs: Vec<f32> = ankles.iter().filter(|a| a.x > 0.0).map(|a| a.x).collect();
    let ys: Vec<f32> = ankles.iter().filter(|a| a.y > 0.0).map(|a| a.y).collect();

    let Some((min_x, max_x)) = min_max(&xs) else {
        return;
    };
    let (min_y, max_y) = min_max(&ys).unwrap_or((0.0, 0.0));

    let feet_box = BoundingBox::new(
        min_x - FEET_PADDING,
        min_y - FEET_PADDING,
        max_x + FEET_PADDING,
        max_y + FEET_PADDING,
    );

    let boots_worn = gear
        .iter()
        .filter(|d| d.class == GearClass::Boots)
        .any(|boot| boot.bbox.iou(&feet_box) > BOOT_IOU_THRESHOLD);

    if !boots_worn {
        missing_gear.push("Boots".to_string());
    }
}

/// Goggles: only judged when the nose is visible; the head box is a fixed
/// square around the nose.
fn check_goggles(
    keypoints: &PoseKeypoints,
    gear: &[GearDetection],
    missing_gear: &mut Vec<String>,
) {
    let nose = keypoints.nose();
    if nose.x <= 0.0 {
        return;
    }

    let head_box = BoundingBox::new(
        nose.x - HEAD_BOX_RADIUS,
        nose.y - HEAD_BOX_RADIUS,
        nose.x + HEAD_BOX_RADIUS,
        nose.y + HEAD_BOX_RADIUS,
    );

    let goggles_worn = gear
        .iter()
        .filter(|d| d.class == GearClass::Goggles)
        .any(|g| g.bbox.iou(&head_box) > GOGGLE_IOU_THRESHOLD);

    if !goggles_worn {
        missing_gear.push("Goggles".to_string());
    }
}

fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let first = values.first()?;
    let mut min = *first;
    let mut max = *first;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    Some((min, max))
}
