// StickFigure - instructional stick figure on a fixed square canvas
//
// Geometry is integer pixel math on a 300x300 canvas with y growing downward.
// "Left" limbs are drawn on the viewer's left. Torso proportions are fixed;
// the pose label only moves arms and legs, except rotate_body which shifts the
// whole torso sideways.

use serde::Serialize;
use std::fmt::{self, Write};

use crate::pose::PoseLabel;
use crate::styles::{AnimationFrame, Expression};

pub const CANVAS_SIZE: i32 = 300;

const HEAD_RADIUS: i32 = 28;
const NECK_LEN: i32 = 18;
const BODY_LEN: i32 = 60;
const SHOULDER_WIDTH: i32 = 54;
const HIP_WIDTH: i32 = 36;
const UPPER_ARM: i32 = 38;
const LOWER_ARM: i32 = 38;
const UPPER_LEG: i32 = 44;
const LOWER_LEG: i32 = 44;
const TORSO_SHIFT: i32 = 24;
const JOINT_RADIUS: i32 = 7;
const CYMBAL_RADIUS: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

const fn pt(x: i32, y: i32) -> Point {
    Point { x, y }
}

/// Resolved joint positions for one animation frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StickFigure {
    pub pose: PoseLabel,
    pub expression: Expression,
    pub cymbals: bool,
    pub head_center: Point,
    pub neck: Point,
    pub pelvis: Point,
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_elbow: Point,
    pub right_elbow: Point,
    pub left_wrist: Point,
    pub right_wrist: Point,
    pub left_hip: Point,
    pub right_hip: Point,
    pub left_knee: Point,
    pub right_knee: Point,
    pub left_ankle: Point,
    pub right_ankle: Point,
}

struct Limbs {
    left_elbow: Point,
    left_wrist: Point,
    right_elbow: Point,
    right_wrist: Point,
    left_knee: Point,
    left_ankle: Point,
    right_knee: Point,
    right_ankle: Point,
}

impl StickFigure {
    pub fn from_frame(frame: AnimationFrame) -> Self {
        Self::new(frame.pose, frame.expression, frame.cymbals)
    }

    pub fn new(pose: PoseLabel, expression: Expression, cymbals: bool) -> Self {
        let center_x = CANVAS_SIZE / 2;
        let pelvis_y = CANVAS_SIZE / 2 + 40;
        let shoulder_y = pelvis_y - BODY_LEN - NECK_LEN;

        let head_center = pt(center_x, shoulder_y - HEAD_RADIUS);
        let mut neck = pt(center_x, shoulder_y);
        let mut pelvis = pt(center_x, pelvis_y);
        let mut left_shoulder = pt(center_x - SHOULDER_WIDTH / 2, shoulder_y);
        let mut right_shoulder = pt(center_x + SHOULDER_WIDTH / 2, shoulder_y);
        let mut left_hip = pt(center_x - HIP_WIDTH / 2, pelvis_y);
        let mut right_hip = pt(center_x + HIP_WIDTH / 2, pelvis_y);

        let limbs = limbs_for(pose, center_x, neck, left_shoulder, right_shoulder, left_hip, right_hip);

        if pose == PoseLabel::RotateBody {
            for p in [
                &mut neck,
                &mut pelvis,
                &mut left_shoulder,
                &mut right_shoulder,
                &mut left_hip,
                &mut right_hip,
            ] {
                p.x += TORSO_SHIFT;
            }
        }

        Self {
            pose,
            expression,
            cymbals: cymbals && pose == PoseLabel::BhajanClap,
            head_center,
            neck,
            pelvis,
            left_shoulder,
            right_shoulder,
            left_elbow: limbs.left_elbow,
            right_elbow: limbs.right_elbow,
            left_wrist: limbs.left_wrist,
            right_wrist: limbs.right_wrist,
            left_hip,
            right_hip,
            left_knee: limbs.left_knee,
            right_knee: limbs.right_knee,
            left_ankle: limbs.left_ankle,
            right_ankle: limbs.right_ankle,
        }
    }

    /// Joint markers in drawing order
    pub fn joints(&self) -> [Point; 13] {
        [
            self.neck,
            self.left_shoulder,
            self.right_shoulder,
            self.left_hip,
            self.right_hip,
            self.right_elbow,
            self.right_wrist,
            self.left_elbow,
            self.left_wrist,
            self.right_knee,
            self.right_ankle,
            self.left_knee,
            self.left_ankle,
        ]
    }

    /// Line segments with stroke width
    pub fn bones(&self) -> [(Point, Point, u32); 11] {
        [
            (self.neck, self.pelvis, 4),
            (self.left_shoulder, self.right_shoulder, 3),
            (self.left_hip, self.right_hip, 3),
            (self.right_shoulder, self.right_elbow, 4),
            (self.right_elbow, self.right_wrist, 4),
            (self.left_shoulder, self.left_elbow, 4),
            (self.left_elbow, self.left_wrist, 4),
            (self.right_hip, self.right_knee, 4),
            (self.right_knee, self.right_ankle, 4),
            (self.left_hip, self.left_knee, 4),
            (self.left_knee, self.left_ankle, 4),
        ]
    }

    pub fn write_svg<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            CANVAS_SIZE
        )?;
        writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        let head = self.head_center;
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="black" stroke-width="3"/>"#,
            head.x, head.y, HEAD_RADIUS
        )?;
        match self.expression {
            Expression::Smile => writeln!(
                out,
                r#"  <path d="M {} {} A 12 6 0 0 0 {} {}" fill="none" stroke="black" stroke-width="2"/>"#,
                head.x - 12,
                head.y + 10,
                head.x + 12,
                head.y + 10
            )?,
            Expression::Closed => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="2"/>"#,
                head.x - 10,
                head.y,
                head.x + 10,
                head.y
            )?,
            Expression::Neutral => {}
        }

        for (a, b, width) in self.bones() {
            writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="{}"/>"#,
                a.x, a.y, b.x, b.y, width
            )?;
        }

        for joint in self.joints() {
            writeln!(
                out,
                r##"  <circle cx="{}" cy="{}" r="{}" fill="#505050"/>"##,
                joint.x, joint.y, JOINT_RADIUS
            )?;
        }

        if self.cymbals {
            for wrist in [self.right_wrist, self.left_wrist] {
                writeln!(
                    out,
                    r##"  <circle cx="{}" cy="{}" r="{}" fill="#ffd700"/>"##,
                    wrist.x, wrist.y, CYMBAL_RADIUS
                )?;
            }
        }

        writeln!(out, "</svg>")
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }
}

fn arms_down(left_shoulder: Point, right_shoulder: Point) -> (Point, Point, Point, Point) {
    let right_elbow = pt(right_shoulder.x + UPPER_ARM / 2, right_shoulder.y + UPPER_ARM);
    let right_wrist = pt(right_elbow.x + LOWER_ARM / 2, right_elbow.y + LOWER_ARM / 2);
    let left_elbow = pt(left_shoulder.x - UPPER_ARM / 2, left_shoulder.y + UPPER_ARM);
    let left_wrist = pt(left_elbow.x - LOWER_ARM / 2, left_elbow.y + LOWER_ARM / 2);
    (left_elbow, left_wrist, right_elbow, right_wrist)
}

fn arms_together(center_x: i32, neck: Point) -> (Point, Point, Point, Point) {
    (
        pt(center_x - 10, neck.y + 30),
        pt(center_x - 5, neck.y + 60),
        pt(center_x + 10, neck.y + 30),
        pt(center_x + 5, neck.y + 60),
    )
}

fn straight_leg(hip: Point) -> (Point, Point) {
    let knee = pt(hip.x, hip.y + UPPER_LEG);
    (knee, pt(knee.x, knee.y + LOWER_LEG))
}

/// Leg lifted into a tap, `dir` = -1 toward the viewer's left
fn tapping_leg(hip: Point, dir: i32) -> (Point, Point) {
    let knee = pt(hip.x + 10 * dir, hip.y + UPPER_LEG);
    (knee, pt(knee.x + 10 * dir, knee.y + LOWER_LEG / 2))
}

fn limbs_for(
    pose: PoseLabel,
    center_x: i32,
    neck: Point,
    left_shoulder: Point,
    right_shoulder: Point,
    left_hip: Point,
    right_hip: Point,
) -> Limbs {
    let (mut left_elbow, mut left_wrist, mut right_elbow, mut right_wrist) =
        arms_down(left_shoulder, right_shoulder);
    let (mut left_knee, mut left_ankle) = straight_leg(left_hip);
    let (mut right_knee, mut right_ankle) = straight_leg(right_hip);

    match pose {
        PoseLabel::BhajanFootTapLeft => {
            (left_knee, left_ankle) = tapping_leg(left_hip, -1);
        }
        PoseLabel::BhajanFootTapRight => {
            (right_knee, right_ankle) = tapping_leg(right_hip, 1);
        }
        PoseLabel::BhajanPrayer | PoseLabel::BhajanClap => {
            (left_elbow, left_wrist, right_elbow, right_wrist) = arms_together(center_x, neck);
        }
        PoseLabel::HandUp => {
            right_elbow = pt(right_shoulder.x + UPPER_ARM / 2, right_shoulder.y - UPPER_ARM);
            right_wrist = pt(right_elbow.x, right_elbow.y - LOWER_ARM);
        }
        PoseLabel::RotateHand => {
            right_elbow = pt(right_shoulder.x + UPPER_ARM, right_shoulder.y);
            right_wrist = pt(right_elbow.x + LOWER_ARM / 2, right_elbow.y - LOWER_ARM);
        }
        PoseLabel::BendKnee => {
            right_knee = pt(right_hip.x + UPPER_LEG / 2, right_hip.y + UPPER_LEG * 3 / 4);
            right_ankle = pt(right_hip.x, right_knee.y + LOWER_LEG * 3 / 4);
        }
        PoseLabel::StepLeft => {
            left_knee = pt(left_hip.x - UPPER_LEG / 2, left_hip.y + UPPER_LEG);
            left_ankle = pt(left_knee.x - LOWER_LEG / 2, left_knee.y + LOWER_LEG);
        }
        PoseLabel::Neutral | PoseLabel::RotateBody => {}
    }

    Limbs {
        left_elbow,
        left_wrist,
        right_elbow,
        right_wrist,
        left_knee,
        left_ankle,
        right_knee,
        right_ankle,
    }
}
