//! Session persistence through the JSON file repository

use async_trait::async_trait;
use lyo_companion_core::*;
use lyo_storage_json::JsonFileRepository;
use std::sync::Arc;

struct Canned;

#[async_trait]
impl GenerationService for Canned {
    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        Ok("Let's look at an example.".to_string())
    }
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = CompanionConfig::default().with_storage_dir(dir.path());
    let repo = JsonFileRepository::from_config(&config);

    let answers = CalibrationAnswers::new(ScaffoldingStyle::ExamplesFirst, Pace::Fast)
        .with_motivation("gamified");
    let mut avatar = Avatar::new(Personality::EnergeticCoach).with_name("Coach Max");
    avatar.profile = calibrate(&answers, avatar.personality());
    avatar.calibration = answers;
    let id = avatar.id;

    let mut session = CompanionSession::new(avatar, Arc::new(Canned), config.clone());
    session.start_session("Web Development");
    session.respond("Where do I start with web development?").await;
    session.record_user_action(UserAction::CompletedLesson);
    session.end_session(15);
    session.save(&repo).await.unwrap();

    assert_eq!(repo.list_avatars().await.unwrap(), vec![id]);

    // A fresh repository instance reads what the first one wrote
    let reopened = JsonFileRepository::new(repo.root());
    let restored = CompanionSession::restore(&reopened, id, Arc::new(Canned), config)
        .await
        .unwrap();

    assert_eq!(restored.avatar().name, "Coach Max");
    assert_eq!(restored.avatar().calibration.motivation, "gamified");
    assert_eq!(restored.avatar().profile.scaffolding_style, ScaffoldingStyle::ExamplesFirst);
    assert!((restored.avatar().profile.hint_frequency() - 0.8).abs() < 1e-6);
    assert_eq!(restored.mood(), CompanionMood::Celebrating);
    assert_eq!(restored.memory().conversation_count, 2);
    assert_eq!(restored.memory().total_study_minutes, 15);
    assert_eq!(restored.memory().achievements().len(), 1);
    assert!(restored
        .memory()
        .topics_discussed()
        .contains(&"web development".to_string()));
    assert!(restored.context().is_empty());
}

#[tokio::test]
async fn test_restore_unknown_avatar_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path());

    let err = CompanionSession::restore(
        &repo,
        Uuid::new_v4(),
        Arc::new(Canned),
        CompanionConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CompanionError::NotFound(_)));
}
