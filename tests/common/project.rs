use crate::common::run_git_command;
use appvcs::areas::executor::Executor;
use appvcs::artifacts::objects::identity::{CommitIdentities, Identity};
use appvcs::artifacts::objects::object_id::ObjectId;
use appvcs::{AppRegistry, Repository, StoreConfig};
use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use assert_fs::prelude::PathCreateDir;
use chrono::DateTime;
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const PROJECT: &str = "demo";

#[fixture]
pub fn apps_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A projects directory holding one freshly initialized, empty project
#[fixture]
pub fn empty_project(apps_dir: TempDir) -> TempDir {
    let project = apps_dir.child(PROJECT);
    project.create_dir_all().expect("Failed to create project dir");
    run_git_command(project.path(), &["init", "--quiet"])
        .assert()
        .success();

    apps_dir
}

#[fixture]
pub fn identities() -> CommitIdentities {
    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();

    CommitIdentities::both(Identity::new(name, email))
}

/// Identities with a fixed date, for commits whose ids must differ only by
/// content and parents
pub fn dated_identities(seconds: i64) -> CommitIdentities {
    let when = DateTime::parse_from_rfc3339("2024-03-01T12:00:00+02:00")
        .expect("valid date")
        + chrono::Duration::seconds(seconds);

    let identity = Identity::new("fake_user".to_string(), "fake_email@email.com".to_string());
    CommitIdentities::both(identity.with_date(when))
}

pub fn project_path(apps_dir: &TempDir) -> PathBuf {
    apps_dir.path().join(PROJECT)
}

pub fn open_repository(project_dir: &Path) -> Repository {
    Repository::open(project_dir, Executor::new("git")).expect("Failed to open repository")
}

pub fn registry(apps_dir: &TempDir) -> AppRegistry {
    AppRegistry::new(StoreConfig::new(apps_dir.path()))
}

pub fn write_file(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Stage everything and commit it
pub async fn commit_all(
    repository: &Repository,
    message: &str,
    identities: CommitIdentities,
) -> ObjectId {
    repository.add_all().await.expect("Failed to stage");
    repository
        .commit(message.to_string(), identities)
        .await
        .expect("Failed to commit")
}
