//! Behavioural properties of the companion engine
//!
//! Each test pins down one externally visible rule of the engine.

use chrono::{Local, TimeZone};
use lyo_companion_core::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

/// Profile parameters never leave the unit interval under repeated adaptation
#[test]
fn test_adaptation_keeps_profile_in_unit_interval() {
    let patterns = [
        BehaviorSignals {
            skip_hints: true,
            responds_well_to_celebration: true,
            rushes_through: true,
        },
        BehaviorSignals {
            skip_hints: true,
            responds_well_to_celebration: false,
            rushes_through: true,
        },
        BehaviorSignals::default(),
    ];

    for personality in Personality::ALL {
        let mut profile = PersonalityProfile::new(personality);
        for round in 0..50 {
            profile.adapt(patterns[round % patterns.len()]);

            for value in [
                profile.hint_frequency(),
                profile.celebration_intensity(),
                profile.pace_preference(),
            ] {
                assert!((0.0..=1.0).contains(&value), "{value} out of range");
            }
        }

        assert_eq!(profile.hint_frequency(), 0.0);
        assert_eq!(profile.celebration_intensity(), 1.0);
        assert_eq!(profile.pace_preference(), 1.0);
    }
}

/// Completing a lesson always celebrates at full energy
#[test]
fn test_completed_lesson_from_any_state() {
    let priors = [
        UserAction::AnsweredIncorrect,
        UserAction::Struggled,
        UserAction::AskedQuestion,
        UserAction::StartedSession,
    ];

    for prior in priors {
        for energy in [0.0, 0.35, 1.0] {
            let mut state = CompanionState::new().with_energy(energy);
            state.update_mood(prior);
            state.update_mood(UserAction::CompletedLesson);

            assert_eq!(state.mood, CompanionMood::Celebrating);
            assert_eq!(state.energy(), 1.0);
        }
    }
}

/// Topics are remembered once; struggles are counted exactly
#[test]
fn test_memory_topics_and_struggles() {
    let mut memory = AvatarMemory::new();
    memory.record_topic("fractions");
    memory.record_topic("fractions");
    assert_eq!(memory.topics_discussed(), &["fractions".to_string()]);

    memory.record_struggle("decimals");
    for _ in 0..3 {
        memory.record_struggle("fractions");
    }
    assert_eq!(memory.struggle_count("fractions"), 3);
    assert_eq!(memory.most_challenging_topic(), Some("fractions"));
}

/// The 101st interaction drops the oldest fifty
#[test]
fn test_interaction_eviction() {
    let mut context = ConversationContext::new();
    for i in 0..101 {
        context.add_interaction(format!("line {i}"), true);
    }
    assert_eq!(context.len(), 51);
    assert_eq!(context.interactions()[0].text, "line 50");
}

/// Examples-first at a fast pace always calibrates to 0.8 hints and 0.9 celebration
#[test]
fn test_calibration_is_deterministic() {
    let answers = CalibrationAnswers::new(ScaffoldingStyle::ExamplesFirst, Pace::parse("fast"));

    for _ in 0..10 {
        let profile = calibrate(&answers, Personality::FriendlyCurious);
        assert!(approx(profile.hint_frequency(), 0.8));
        assert!(approx(profile.celebration_intensity(), 0.9));
    }
}

/// A late session start is tired; a correct answer then celebrates with a boost
#[test]
fn test_late_night_session_then_correct_answer() {
    let late = Local
        .with_ymd_and_hms(2024, 11, 2, 23, 15, 0)
        .earliest()
        .unwrap();

    let mut state = CompanionState::new().with_energy(0.5);
    state.update_mood_at(UserAction::StartedSession, late);
    assert_eq!(state.mood, CompanionMood::Tired);

    state.update_mood_at(UserAction::AnsweredCorrect, late);
    assert_eq!(state.mood, CompanionMood::Celebrating);
    assert!(approx(state.energy(), 0.6));

    let mut full = CompanionState::new();
    full.update_mood_at(UserAction::AnsweredCorrect, late);
    assert_eq!(full.energy(), 1.0);
}

/// Career goals pick the energetic coach
#[test]
fn test_professional_goals_pick_energetic_coach() {
    let diagnosis = diagnostic_to_calibration(
        "I want to grow professionally in my career",
        "",
        None,
        Personality::CalmReflective,
    );
    assert_eq!(diagnosis.personality, Personality::EnergeticCoach);
}

/// Stored records that carry out-of-range values are clamped on load
#[test]
fn test_deserialized_profile_is_clamped() {
    let json = r#"{
        "base_personality": "wise_patient",
        "hint_frequency": 1.4,
        "celebration_intensity": -0.3,
        "pace_preference": 0.5,
        "scaffolding_style": "theory-first"
    }"#;
    let profile: PersonalityProfile = serde_json::from_str(json).unwrap();

    assert_eq!(profile.base_personality, Personality::WisePatient);
    assert_eq!(profile.hint_frequency(), 1.0);
    assert_eq!(profile.celebration_intensity(), 0.0);
    assert_eq!(profile.scaffolding_style, ScaffoldingStyle::TheoryFirst);
}
