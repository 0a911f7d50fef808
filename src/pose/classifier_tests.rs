use super::*;
use crate::pose::Landmark;

fn at(x: f32, y: f32) -> Landmark {
    Landmark::new(x, y, 0.0, 1.0)
}

/// Standing pose with the right hand raised above the shoulder
fn hand_up_frame() -> PoseFrame {
    PoseFrame::standing().with_joint(Joint::RightWrist, at(0.37, 0.20))
}

#[test]
fn test_missing_pose_is_neutral_and_wrong() {
    let classifier = PoseClassifier::new();
    let result = classifier.classify(None, InstructionStyle::Pop);

    assert_eq!(result.label, PoseLabel::Neutral);
    assert!(!result.is_correct);
    assert!(result.instructions.is_empty());
}

#[test]
fn test_standing_pose_matches_nothing() {
    let classifier = PoseClassifier::new();
    for style in InstructionStyle::ALL {
        let result = classifier.classify(Some(&PoseFrame::standing()), style);
        assert_eq!(result.label, PoseLabel::Neutral, "style {}", style);
        assert!(!result.is_correct);
    }
}

#[test]
fn test_hand_up() {
    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&hand_up_frame()), InstructionStyle::Pop);

    assert_eq!(result.label, PoseLabel::HandUp);
    assert!(result.is_correct);
    assert_eq!(
        result.instructions,
        vec!["Step one, raise your hand up for pop".to_string()]
    );
}

#[test]
fn test_last_match_wins_over_earlier_rules() {
    // hand up (rule 1) and wide shoulders (rule 5) at the same time
    let frame = hand_up_frame()
        .with_joint(Joint::LeftShoulder, at(0.75, 0.30))
        .with_joint(Joint::RightShoulder, at(0.30, 0.30));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Bollywood);

    assert_eq!(result.label, PoseLabel::RotateBody);
    assert!(result.is_correct);
    assert_eq!(result.instructions.len(), 2);
    assert!(result.instructions[0].starts_with("Step one"));
    assert_eq!(
        result.instructions[1],
        "Step five, rotate your body for bollywood"
    );
}

#[test]
fn test_bend_knee() {
    let frame = PoseFrame::standing().with_joint(Joint::RightKnee, at(0.30, 0.75));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Hiphop);

    assert_eq!(result.label, PoseLabel::BendKnee);
    assert!(result.is_correct);
}

#[test]
fn test_mirrored_knee_bend_reads_as_reflex_angle() {
    // Same bend pointing the other way measures 270 degrees and is not flagged
    let frame = PoseFrame::standing().with_joint(Joint::RightKnee, at(0.60, 0.75));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Hiphop);

    assert_eq!(result.label, PoseLabel::Neutral);
}

#[test]
fn test_step_left() {
    let frame = PoseFrame::standing().with_joint(Joint::LeftAnkle, at(0.40, 0.90));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Bhojpuri);

    assert_eq!(result.label, PoseLabel::StepLeft);
}

#[test]
fn test_rotate_hand_also_counts_as_hand_up() {
    // Wrist above both shoulder and elbow with a sideways offset
    let frame = PoseFrame::standing().with_joint(Joint::RightWrist, at(0.20, 0.25));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Pop);

    assert_eq!(result.label, PoseLabel::RotateHand);
    assert_eq!(result.instructions.len(), 2);
}

#[test]
fn test_bhajan_both_hands_up() {
    let frame = hand_up_frame().with_joint(Joint::LeftWrist, at(0.63, 0.20));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Bhajan);

    assert_eq!(result.label, PoseLabel::HandUp);
    assert!(result.is_correct);
    assert_eq!(result.instructions, vec!["Bhajan: Raise both hands up"]);
}

#[test]
fn test_bhajan_single_hand_up_is_not_enough() {
    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&hand_up_frame()), InstructionStyle::Bhajan);

    assert_eq!(result.label, PoseLabel::Neutral);
    assert!(!result.is_correct);
}

#[test]
fn test_bhajan_left_hand_rotation() {
    let frame = PoseFrame::standing().with_joint(Joint::LeftWrist, at(0.75, 0.35));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Bhajan);

    assert_eq!(result.label, PoseLabel::RotateHand);
    assert_eq!(result.instructions, vec!["Bhajan: Rotate your hand"]);
}

#[test]
fn test_bhajan_skips_generic_rules() {
    let frame = PoseFrame::standing()
        .with_joint(Joint::LeftShoulder, at(0.75, 0.30))
        .with_joint(Joint::RightShoulder, at(0.30, 0.30))
        .with_joint(Joint::LeftAnkle, at(0.40, 0.90));

    let classifier = PoseClassifier::new();
    let result = classifier.classify(Some(&frame), InstructionStyle::Bhajan);

    assert_eq!(result.label, PoseLabel::Neutral);
    assert!(!result.is_correct);
}
