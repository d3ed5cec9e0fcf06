use crate::common::project::{
    PROJECT, apps_dir, empty_project, identities, project_path, registry, write_file,
};
use crate::common::{head_commit_sha, run_git_command};
use appvcs::AppRegistry;
use appvcs::artifacts::apps::entry_point::Origin;
use appvcs::artifacts::apps::{Application, ViewLocation};
use appvcs::artifacts::objects::identity::CommitIdentities;
use appvcs::artifacts::objects::object_id::ObjectId;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::sync::Arc;

mod common;

const FIXTURE_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "fake_user"),
    ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
    ("GIT_COMMITTER_NAME", "fake_user"),
    ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
];

/// A project with one commit holding an entry point, a view, a stylesheet
/// and metadata
#[fixture]
fn committed_project(empty_project: TempDir) -> (TempDir, ObjectId) {
    let dir = project_path(&empty_project);
    write_file(&dir, "app/index.js", "module.exports = 'v1';");
    write_file(&dir, "views/home.html", "<h1>home</h1>");
    write_file(&dir, "static/css/site.css", "body { color: red; }");
    write_file(&dir, "meta.json", r##"{"name": "Demo", "color": "#ffffff"}"##);

    run_git_command(&dir, &["add", "--all"]).assert().success();
    run_git_command(&dir, &["commit", "--quiet", "-m", "init"])
        .envs(FIXTURE_IDENTITY)
        .assert()
        .success();
    let commit = ObjectId::try_parse(head_commit_sha(&dir)).expect("HEAD is an object id");

    (empty_project, commit)
}

#[rstest]
#[tokio::test]
async fn saving_a_file_never_touches_a_loaded_revision(
    committed_project: (TempDir, ObjectId),
) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);
    let revision = commit.to_string();

    let live = registry.live(PROJECT).await.unwrap();
    let versioned = registry.versioned(PROJECT, &revision).await.unwrap();
    assert_eq!(live.load_entry_point().await.unwrap().source_text(), "module.exports = 'v1';");
    assert_eq!(versioned.load_entry_point().await.unwrap().source_text(), "module.exports = 'v1';");

    registry
        .save_file(PROJECT, "app/index.js", b"module.exports = 'v2';")
        .await
        .unwrap();

    let current = live.load_entry_point().await.unwrap();
    assert_eq!(current.source_text(), "module.exports = 'v2';");
    assert_eq!(current.origin(), &Origin::WorkingCopy);

    let historical = registry
        .versioned(PROJECT, &revision)
        .await
        .unwrap()
        .load_entry_point()
        .await
        .unwrap();
    assert_eq!(historical.source_text(), "module.exports = 'v1';");
    assert_eq!(historical.origin(), &Origin::Revision(commit));
}

#[rstest]
#[tokio::test]
async fn live_entry_point_is_cached_until_invalidated(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, _) = committed_project;
    let registry = registry(&apps_dir);
    let live = registry.live(PROJECT).await.unwrap();

    let first = live.load_entry_point().await.unwrap();
    // written behind the registry's back
    write_file(&project_path(&apps_dir), "app/index.js", "changed");
    let second = live.load_entry_point().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    assert!(registry.invalidate(PROJECT).await);
    assert!(!registry.invalidate(PROJECT).await);
    assert_eq!(live.load_entry_point().await.unwrap().source_text(), "changed");
}

#[rstest]
#[case("/static/css/site.css")]
#[case("static/./img/../css/site.css")]
#[tokio::test]
async fn historical_content_carries_its_content_type(
    committed_project: (TempDir, ObjectId),
    #[case] path: &str,
) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);

    let content = registry
        .resolve_historical_content(PROJECT, &commit.to_string(), path)
        .await
        .unwrap();

    assert_eq!(&content.bytes[..], b"body { color: red; }");
    assert_eq!(content.content_type, "text/css");
}

#[rstest]
#[tokio::test]
async fn historical_content_of_unknown_extension_is_octet_stream(
    empty_project: TempDir,
    identities: CommitIdentities,
) {
    let registry = registry(&empty_project);
    write_file(&project_path(&empty_project), "data/blob.unknownext", "\u{1}\u{2}");
    let commit = registry.commit(PROJECT, "data", identities).await.unwrap();

    let content = registry
        .resolve_historical_content(PROJECT, &commit.to_string(), "data/blob.unknownext")
        .await
        .unwrap();

    assert_eq!(content.content_type, "application/octet-stream");
}

#[rstest]
#[tokio::test]
async fn versioned_apps_are_cached_per_revision(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);
    let full = commit.to_string();
    let short = commit.to_short_oid();

    let first = registry.versioned(PROJECT, &full).await.unwrap();
    let again = registry.versioned(PROJECT, &full).await.unwrap();
    let abbreviated = registry.versioned(PROJECT, &short).await.unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &abbreviated));
    assert_eq!(first.commit(), abbreviated.commit());
    assert_eq!(abbreviated.revision(), short);
}

#[rstest]
#[case("HEAD")]
#[case("abc")]
#[case("ABCDEF12")]
#[case("0000000")]
#[case("master")]
#[case("../../etc")]
#[tokio::test]
async fn revisions_other_than_commit_ids_are_not_found(
    committed_project: (TempDir, ObjectId),
    #[case] revision: &str,
) {
    let (apps_dir, _) = committed_project;
    let registry = registry(&apps_dir);

    let error = registry.versioned(PROJECT, revision).await.unwrap_err();

    assert!(error.is_not_found(), "{revision}: {error:?}");
}

#[rstest]
#[tokio::test]
async fn revision_naming_a_tree_is_not_found(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);
    let versioned = registry.versioned(PROJECT, &commit.to_string()).await.unwrap();

    let error = registry
        .versioned(PROJECT, &versioned.tree_oid().to_string())
        .await
        .unwrap_err();

    assert!(error.is_not_found(), "{error:?}");
}

#[rstest]
#[case("missing")]
#[case("../demo")]
#[case("with space")]
#[case("")]
#[tokio::test]
async fn unknown_or_invalid_projects_are_not_found(apps_dir: TempDir, #[case] name: &str) {
    let registry = registry(&apps_dir);

    let error = registry.live(name).await.unwrap_err();

    assert!(error.is_not_found(), "{name}: {error:?}");
}

#[rstest]
#[tokio::test]
async fn metadata_is_read_at_the_requested_revision(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);
    registry
        .save_file(PROJECT, "meta.json", br##"{"name": "Demo", "color": "#000000"}"##)
        .await
        .unwrap();

    let historical = registry
        .application(PROJECT, Some(&commit.to_string()))
        .await
        .unwrap()
        .resolve_metadata()
        .await
        .unwrap();
    let current = registry
        .application(PROJECT, None)
        .await
        .unwrap()
        .resolve_metadata()
        .await
        .unwrap();

    assert_eq!(historical.color, "#ffffff");
    assert_eq!(current.color, "#000000");
    assert_eq!(historical.name, "Demo");
    assert_eq!(historical.author, "Coder");
}

#[rstest]
#[tokio::test]
async fn missing_metadata_falls_back_to_defaults(
    empty_project: TempDir,
    identities: CommitIdentities,
) {
    let registry = registry(&empty_project);
    write_file(&project_path(&empty_project), "app/index.js", "");
    let commit = registry.commit(PROJECT, "no metadata", identities).await.unwrap();

    let app = registry.application(PROJECT, Some(&commit.to_string())).await.unwrap();
    let metadata = app.resolve_metadata().await.unwrap();

    assert_eq!(metadata.appname, PROJECT);
    assert_eq!(metadata.color, "#1abc9c");
    assert_eq!(metadata.author, "Coder");
}

#[rstest]
#[tokio::test]
async fn views_resolve_to_disk_or_tree(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, commit) = committed_project;
    let registry: AppRegistry = registry(&apps_dir);

    let live = registry.application(PROJECT, None).await.unwrap();
    let versioned = registry
        .application(PROJECT, Some(&commit.to_string()))
        .await
        .unwrap();

    let expected_disk = project_path(&apps_dir)
        .canonicalize()
        .unwrap()
        .join("views")
        .join("home.html");
    assert_eq!(live.view_path("home"), ViewLocation::Disk(expected_disk));

    let Application::Versioned(app) = &versioned else {
        panic!("expected a versioned application");
    };
    assert_eq!(
        versioned.view_path("home"),
        ViewLocation::Tree {
            tree: app.tree_oid().clone(),
            path: "views/home.html".to_string(),
        }
    );
    assert_eq!(versioned.name(), PROJECT);
}

#[rstest]
#[tokio::test]
async fn missing_entry_point_at_revision_is_not_found(
    empty_project: TempDir,
    identities: CommitIdentities,
) {
    let registry = registry(&empty_project);
    write_file(&project_path(&empty_project), "README.md", "no code here");
    let commit = registry.commit(PROJECT, "docs only", identities).await.unwrap();

    let app = registry.application(PROJECT, Some(&commit.to_string())).await.unwrap();
    let error = app.load_entry_point().await.unwrap_err();

    assert!(error.is_not_found(), "{error:?}");
}

#[rstest]
#[tokio::test]
async fn status_and_history_go_through_the_registry(
    committed_project: (TempDir, ObjectId),
    identities: CommitIdentities,
) {
    let (apps_dir, first) = committed_project;
    let registry = registry(&apps_dir);
    assert!(registry.status(PROJECT).await.unwrap().is_empty());

    registry
        .save_file(PROJECT, "app/index.js", b"module.exports = 'v2';")
        .await
        .unwrap();
    let statuses = registry.status(PROJECT).await.unwrap();
    assert_eq!(statuses["app/index.js"].to_string(), " M");

    let second = registry.commit(PROJECT, "second", identities).await.unwrap();
    let history = registry.history(PROJECT).await.unwrap();
    let oids: Vec<_> = history.iter().map(|commit| commit.oid().clone()).collect();
    assert_eq!(oids, vec![second, first]);
}

#[rstest]
#[tokio::test]
async fn concurrent_misses_share_one_versioned_app(committed_project: (TempDir, ObjectId)) {
    let (apps_dir, commit) = committed_project;
    let registry = registry(&apps_dir);
    let revision = commit.to_string();

    let apps = futures::future::join_all(
        (0..4).map(|_| registry.versioned(PROJECT, &revision)),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

    let cached = registry.versioned(PROJECT, &revision).await.unwrap();
    assert!(apps.iter().all(|app| Arc::ptr_eq(app, &cached)));
}
