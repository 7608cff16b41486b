//! Behaviour tests for the exercise tracker's domain services.
//!
//! Scenarios run against the in-memory store with the real Argon2 hasher,
//! so registration, the social graph, exercise ownership and the feeds are
//! exercised end to end without HTTP.

use std::cell::RefCell;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use tokio::runtime::Runtime;
use workout_planner::domain::ports::{
    CredentialStore, ExerciseCommand, ExerciseQuery, FeedQuery, SocialGraph,
};
use workout_planner::domain::{
    CredentialService, Exercise, ExerciseAttributes, ExerciseService, FeedService,
    FollowOutcome, LoginCredentials, RegistrationDetails, RegistrationOutcome,
    SocialGraphService, UnfollowOutcome, Username, VerificationOutcome,
};
use workout_planner::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use workout_planner::outbound::security::Argon2CredentialHasher;

struct ExerciseFeedWorld {
    runtime: Runtime,
    credentials: Arc<dyn CredentialStore>,
    social: Arc<dyn SocialGraph>,
    commands: Arc<dyn ExerciseCommand>,
    queries: Arc<dyn ExerciseQuery>,
    feeds: Arc<dyn FeedQuery>,
    last_registration: RefCell<Option<RegistrationOutcome>>,
    last_login: RefCell<Option<VerificationOutcome>>,
    last_follow: RefCell<Option<FollowOutcome>>,
    last_unfollow: RefCell<Option<UnfollowOutcome>>,
    last_applied: RefCell<Option<bool>>,
    last_exercise: RefCell<Option<Exercise>>,
    last_clone: RefCell<Option<Exercise>>,
}

impl ExerciseFeedWorld {
    fn new() -> Self {
        let runtime = Runtime::new().expect("tokio runtime should initialize");
        let users = Arc::new(InMemoryUserRepository::default());
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let credentials = Arc::new(CredentialService::new(
            users.clone(),
            Arc::new(Argon2CredentialHasher),
            clock.clone(),
        ));
        let social = Arc::new(SocialGraphService::new(users));
        let exercises = Arc::new(ExerciseService::new(
            Arc::new(InMemoryExerciseRepository::default()),
            clock,
        ));
        let feeds = Arc::new(FeedService::new(social.clone(), exercises.clone()));
        Self {
            runtime,
            credentials,
            social,
            commands: exercises.clone(),
            queries: exercises,
            feeds,
            last_registration: RefCell::new(None),
            last_login: RefCell::new(None),
            last_follow: RefCell::new(None),
            last_unfollow: RefCell::new(None),
            last_applied: RefCell::new(None),
            last_exercise: RefCell::new(None),
            last_clone: RefCell::new(None),
        }
    }

    fn last_exercise(&self) -> Exercise {
        self.last_exercise
            .borrow()
            .clone()
            .expect("an exercise should have been logged")
    }

    /// Re-read the last exercise so assertions see the stored state.
    fn reload_last_exercise(&self) -> Exercise {
        let id = self.last_exercise().id();
        self.runtime
            .block_on(self.queries.get(id))
            .expect("get should succeed")
            .expect("exercise should still exist")
    }
}

fn user(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

fn named(raw: &str) -> ExerciseAttributes {
    ExerciseAttributes::from_value(json!({ "name": raw })).expect("object attributes")
}

fn names(exercises: &[Exercise]) -> Vec<String> {
    exercises
        .iter()
        .map(|exercise| {
            exercise
                .attributes()
                .get("name")
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_owned()
        })
        .collect()
}

#[fixture]
fn world() -> ExerciseFeedWorld {
    ExerciseFeedWorld::new()
}

#[given("an empty exercise tracker")]
fn an_empty_exercise_tracker(world: &ExerciseFeedWorld) {
    let everything = world
        .runtime
        .block_on(world.feeds.global_feed())
        .expect("global feed should load");
    assert!(everything.is_empty());
}

#[when("{username} registers with email {email} and password {password}")]
fn user_registers(world: &ExerciseFeedWorld, username: String, email: String, password: String) {
    let details = RegistrationDetails::try_from_parts(&username, &email, &password)
        .expect("valid registration details");
    let outcome = world
        .runtime
        .block_on(world.credentials.register(&details))
        .expect("registration should reach the store");
    *world.last_registration.borrow_mut() = Some(outcome);
}

#[when("{username} logs in with password {password}")]
fn user_logs_in(world: &ExerciseFeedWorld, username: String, password: String) {
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).expect("valid credentials");
    let outcome = world
        .runtime
        .block_on(world.credentials.verify(&credentials))
        .expect("verification should reach the store");
    *world.last_login.borrow_mut() = Some(outcome);
}

#[when("{username} follows {target}")]
fn user_follows(world: &ExerciseFeedWorld, username: String, target: String) {
    let outcome = world
        .runtime
        .block_on(world.social.follow(&user(&username), &user(&target)))
        .expect("follow should succeed");
    *world.last_follow.borrow_mut() = Some(outcome);
}

#[when("{username} unfollows {target}")]
fn user_unfollows(world: &ExerciseFeedWorld, username: String, target: String) {
    let outcome = world
        .runtime
        .block_on(world.social.unfollow(&user(&username), &user(&target)))
        .expect("unfollow should succeed");
    *world.last_unfollow.borrow_mut() = Some(outcome);
}

#[when("{username} logs an exercise named {name}")]
fn user_logs_an_exercise(world: &ExerciseFeedWorld, username: String, name: String) {
    let exercise = world
        .runtime
        .block_on(world.commands.create(&user(&username), named(&name)))
        .expect("create should succeed");
    *world.last_exercise.borrow_mut() = Some(exercise);
}

#[when("{username} renames the last exercise to {name}")]
fn user_renames_the_last_exercise(world: &ExerciseFeedWorld, username: String, name: String) {
    let id = world.last_exercise().id();
    let outcome = world
        .runtime
        .block_on(world.commands.edit(id, &user(&username), named(&name)))
        .expect("edit should reach the store");
    *world.last_applied.borrow_mut() = Some(outcome.applied);
}

#[when("{username} toggles the last exercise")]
fn user_toggles_the_last_exercise(world: &ExerciseFeedWorld, username: String) {
    let id = world.last_exercise().id();
    let outcome = world
        .runtime
        .block_on(world.commands.toggle_complete(id, &user(&username)))
        .expect("toggle should reach the store");
    assert_eq!(outcome.applied, outcome.new_value.is_some());
    *world.last_applied.borrow_mut() = Some(outcome.applied);
}

#[when("{username} clones the last exercise")]
fn user_clones_the_last_exercise(world: &ExerciseFeedWorld, username: String) {
    let id = world.last_exercise().id();
    let clone = world
        .runtime
        .block_on(world.commands.clone_exercise(
            id,
            &user(&username),
            ExerciseAttributes::default(),
        ))
        .expect("clone should reach the store")
        .expect("source exercise should exist");
    *world.last_clone.borrow_mut() = Some(clone);
}

#[then("the registration is created")]
fn the_registration_is_created(world: &ExerciseFeedWorld) {
    assert_eq!(
        *world.last_registration.borrow(),
        Some(RegistrationOutcome::created())
    );
}

#[then("the registration is rejected with username taken {username_taken} and email taken {email_taken}")]
fn the_registration_is_rejected(
    world: &ExerciseFeedWorld,
    username_taken: bool,
    email_taken: bool,
) {
    assert_eq!(
        *world.last_registration.borrow(),
        Some(RegistrationOutcome::rejected(username_taken, email_taken))
    );
}

#[then("the login is verified")]
fn the_login_is_verified(world: &ExerciseFeedWorld) {
    assert_eq!(
        *world.last_login.borrow(),
        Some(VerificationOutcome::checked(true))
    );
}

#[then("the login is found but not verified")]
fn the_login_is_found_but_not_verified(world: &ExerciseFeedWorld) {
    assert_eq!(
        *world.last_login.borrow(),
        Some(VerificationOutcome::checked(false))
    );
}

#[then("the follow is added")]
fn the_follow_is_added(world: &ExerciseFeedWorld) {
    assert_eq!(*world.last_follow.borrow(), Some(FollowOutcome::added()));
}

#[then("alice was already following")]
fn alice_was_already_following(world: &ExerciseFeedWorld) {
    assert_eq!(
        *world.last_follow.borrow(),
        Some(FollowOutcome::already_following())
    );
}

#[then("nothing is removed")]
fn nothing_is_removed(world: &ExerciseFeedWorld) {
    assert_eq!(
        *world.last_unfollow.borrow(),
        Some(UnfollowOutcome { removed: false })
    );
}

#[then("the following list of {username} is {target}")]
fn the_following_list_is(world: &ExerciseFeedWorld, username: String, target: String) {
    let following = world
        .runtime
        .block_on(world.social.list_following(&user(&username)))
        .expect("following list should load");
    assert_eq!(following, vec![user(&target)]);
}

#[then("the last exercise is owned by {username} and incomplete")]
fn the_last_exercise_is_owned_and_incomplete(world: &ExerciseFeedWorld, username: String) {
    let stored = world.reload_last_exercise();
    assert_eq!(stored.owner(), &user(&username));
    assert!(!stored.complete());
}

#[then("the following feed of {username} holds only the last exercise")]
fn the_following_feed_holds_only_the_last_exercise(world: &ExerciseFeedWorld, username: String) {
    let feed = world
        .runtime
        .block_on(world.feeds.following_feed(&user(&username)))
        .expect("following feed should load");
    let ids: Vec<_> = feed.iter().map(Exercise::id).collect();
    assert_eq!(ids, vec![world.last_exercise().id()]);
}

#[then("the following feed of {username} names {expected}")]
fn the_following_feed_names(world: &ExerciseFeedWorld, username: String, expected: String) {
    let feed = world
        .runtime
        .block_on(world.feeds.following_feed(&user(&username)))
        .expect("following feed should load");
    assert_eq!(names(&feed), split_names(&expected));
}

#[then("the global feed names {expected}")]
fn the_global_feed_names(world: &ExerciseFeedWorld, expected: String) {
    let feed = world
        .runtime
        .block_on(world.feeds.global_feed())
        .expect("global feed should load");
    assert_eq!(names(&feed), split_names(&expected));
}

#[then("the exercises of {username} name {expected}")]
fn the_exercises_of_user_name(world: &ExerciseFeedWorld, username: String, expected: String) {
    let mine = world
        .runtime
        .block_on(world.feeds.my_exercises(&user(&username)))
        .expect("own exercises should load");
    assert_eq!(names(&mine), split_names(&expected));
}

#[then("the change is applied")]
fn the_change_is_applied(world: &ExerciseFeedWorld) {
    assert_eq!(*world.last_applied.borrow(), Some(true));
}

#[then("the change is not applied")]
fn the_change_is_not_applied(world: &ExerciseFeedWorld) {
    assert_eq!(*world.last_applied.borrow(), Some(false));
    let stored = world.reload_last_exercise();
    assert_eq!(&stored, &world.last_exercise());
}

#[then("the last exercise is named {name}")]
fn the_last_exercise_is_named(world: &ExerciseFeedWorld, name: String) {
    let stored = world.reload_last_exercise();
    assert_eq!(names(&[stored]), vec![name]);
}

#[then("the last exercise is complete")]
fn the_last_exercise_is_complete(world: &ExerciseFeedWorld) {
    assert!(world.reload_last_exercise().complete());
}

#[then("the last exercise is incomplete")]
fn the_last_exercise_is_incomplete(world: &ExerciseFeedWorld) {
    assert!(!world.reload_last_exercise().complete());
}

#[then("the clone is a new incomplete exercise owned by {username} named {name}")]
fn the_clone_is_a_new_exercise(world: &ExerciseFeedWorld, username: String, name: String) {
    let clone = world
        .last_clone
        .borrow()
        .clone()
        .expect("a clone should have been made");
    let source = world.reload_last_exercise();
    assert_ne!(clone.id(), source.id());
    assert_eq!(clone.owner(), &user(&username));
    assert!(!clone.complete());
    assert_eq!(names(std::slice::from_ref(&clone)), vec![name]);
    assert_eq!(clone.attributes(), source.attributes());

    let stored = world
        .runtime
        .block_on(world.queries.get(clone.id()))
        .expect("get should succeed");
    assert_eq!(stored.as_ref().map(Exercise::id), Some(clone.id()));
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_owned()).collect()
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Two users share an exercise through the following feed"
)]
fn two_users_share_an_exercise(world: ExerciseFeedWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Usernames and emails stay unique"
)]
fn usernames_and_emails_stay_unique(world: ExerciseFeedWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Following and unfollowing are idempotent"
)]
fn following_and_unfollowing_are_idempotent(world: ExerciseFeedWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Feeds are scoped to the people followed"
)]
fn feeds_are_scoped_to_the_people_followed(world: ExerciseFeedWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Owners alone may change an exercise"
)]
fn owners_alone_may_change_an_exercise(world: ExerciseFeedWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/exercise_feed.feature",
    name = "Cloning copies into the requester's log"
)]
fn cloning_copies_into_the_requesters_log(world: ExerciseFeedWorld) {
    drop(world);
}
