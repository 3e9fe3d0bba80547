use std::io::Write;

use pretty_assertions::assert_eq;

use crate::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.0001
}

#[test]
fn test_default_prefs() {
    let prefs = DEFAULT_PREFS.clone();
    assert_eq!(prefs.puzzle.size, 3);
    assert_eq!(prefs.scramble.difficulty, 0);
    assert_eq!(prefs.animation.flip_type, FlipType::Swift);
    assert_eq!(prefs.interaction.rotation_type, RotationType::Free);
    assert_eq!(
        prefs.animation.swift.layer_easing,
        Easing::PowerOut { power: 3.0 },
    );
    assert_eq!(
        prefs.animation.bounce.puzzle_easing,
        Easing::BackOut { overshoot: 2.0 },
    );
    prefs.validate().unwrap();

    assert_eq!(Preferences::load(None), prefs);
}

#[test]
fn test_easing_endpoints() {
    let easings = [
        Easing::Lerp,
        Easing::Cosine,
        Easing::PowerOut { power: 3.0 },
        Easing::PowerOut { power: 4.0 },
        Easing::SineOut,
        Easing::BackOut { overshoot: 1.5 },
    ];
    for easing in easings {
        assert!(approx(easing.interpolate(0.0), 0.0), "{easing:?}");
        assert!(approx(easing.interpolate(1.0), 1.0), "{easing:?}");
    }

    assert!(approx(Easing::PowerOut { power: 3.0 }.interpolate(0.5), 0.875));
    // Overshoot goes past the target before settling.
    assert!(Easing::BackOut { overshoot: 1.5 }.interpolate(0.8) > 1.0);
}

#[test]
fn test_user_prefs_override_defaults() {
    let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
    writeln!(
        file,
        "puzzle:\n  size: 4\nanimation:\n  flip_type: bounce\ninteraction:\n  rotation_type: fixed",
    )
    .unwrap();

    let prefs = Preferences::try_load(Some(file.path())).unwrap();
    assert_eq!(prefs.puzzle.size, 4);
    assert_eq!(prefs.animation.flip_type, FlipType::Bounce);
    assert_eq!(prefs.interaction.rotation_type, RotationType::Fixed);
    // Unspecified values keep their defaults.
    assert_eq!(prefs.animation.bounce, DEFAULT_PREFS.animation.bounce);
    assert_eq!(
        prefs.interaction.drag_threshold,
        DEFAULT_PREFS.interaction.drag_threshold,
    );
}

#[test]
fn test_invalid_user_prefs_fall_back() {
    let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
    writeln!(file, "puzzle:\n  size: 7").unwrap();

    Preferences::try_load(Some(file.path())).expect_err("size 7 is unsupported");
    assert_eq!(Preferences::load(Some(file.path())), *DEFAULT_PREFS);
}

#[test]
fn test_yaml_roundtrip() {
    let yaml = DEFAULT_PREFS.to_yaml_string().unwrap();
    let prefs: Preferences = serde_norway::from_str(&yaml).unwrap();
    assert_eq!(prefs, *DEFAULT_PREFS);
}
