//! Feed composition.
//!
//! Feeds are computed per request from the social graph and the exercise
//! query port. The service holds no state of its own.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{ExerciseQuery, FeedQuery, SocialGraph};
use crate::domain::{Error, Exercise, Username};

/// Builds the personal, following and global feeds.
#[derive(Clone)]
pub struct FeedService {
    social: Arc<dyn SocialGraph>,
    exercises: Arc<dyn ExerciseQuery>,
}

impl FeedService {
    pub fn new(social: Arc<dyn SocialGraph>, exercises: Arc<dyn ExerciseQuery>) -> Self {
        Self { social, exercises }
    }
}

#[async_trait]
impl FeedQuery for FeedService {
    async fn my_exercises(&self, me: &Username) -> Result<Vec<Exercise>, Error> {
        self.exercises.list_by_owner(me).await
    }

    async fn following_feed(&self, me: &Username) -> Result<Vec<Exercise>, Error> {
        let following = self.social.list_following(me).await?;
        let mut feed = Vec::new();
        for followed in &following {
            // Dangling names (never registered) own nothing and add nothing.
            let owned = self.exercises.list_by_owner(followed).await?;
            feed.extend(owned);
        }
        debug!(
            username = %me,
            followed = following.len(),
            exercises = feed.len(),
            "following feed composed"
        );
        Ok(feed)
    }

    async fn global_feed(&self) -> Result<Vec<Exercise>, Error> {
        self.exercises.list_all().await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockExerciseQuery, MockSocialGraph};
    use crate::domain::{ExerciseAttributes, ExerciseId};
    use chrono::Utc;
    use rstest::rstest;

    fn name(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    fn exercise_for(owner: &str) -> Exercise {
        Exercise::new(
            ExerciseId::random(),
            name(owner),
            ExerciseAttributes::default(),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn following_feed_concatenates_in_following_order() {
        let mut social = MockSocialGraph::new();
        social
            .expect_list_following()
            .returning(|_| Ok(vec![name("carol"), name("ghost"), name("bob")]));
        let mut exercises = MockExerciseQuery::new();
        exercises
            .expect_list_by_owner()
            .returning(|owner| match owner.as_ref() {
                "bob" => Ok(vec![exercise_for("bob"), exercise_for("bob")]),
                "carol" => Ok(vec![exercise_for("carol")]),
                _ => Ok(Vec::new()),
            });

        let feed = FeedService::new(Arc::new(social), Arc::new(exercises))
            .following_feed(&name("alice"))
            .await
            .expect("feed");
        let owners: Vec<&str> = feed.iter().map(|e| e.owner().as_ref()).collect();
        assert_eq!(owners, vec!["carol", "bob", "bob"]);
    }

    #[rstest]
    #[tokio::test]
    async fn following_feed_is_empty_without_follows() {
        let mut social = MockSocialGraph::new();
        social.expect_list_following().returning(|_| Ok(Vec::new()));
        let mut exercises = MockExerciseQuery::new();
        exercises.expect_list_by_owner().never();

        let feed = FeedService::new(Arc::new(social), Arc::new(exercises))
            .following_feed(&name("alice"))
            .await
            .expect("feed");
        assert!(feed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn my_and_global_feeds_delegate() {
        let mut exercises = MockExerciseQuery::new();
        exercises
            .expect_list_by_owner()
            .withf(|owner| owner.as_ref() == "alice")
            .returning(|_| Ok(vec![exercise_for("alice")]));
        exercises
            .expect_list_all()
            .returning(|| Ok(vec![exercise_for("alice"), exercise_for("bob")]));
        let service = FeedService::new(Arc::new(MockSocialGraph::new()), Arc::new(exercises));

        assert_eq!(
            service.my_exercises(&name("alice")).await.expect("mine").len(),
            1
        );
        assert_eq!(service.global_feed().await.expect("global").len(), 2);
    }
}
