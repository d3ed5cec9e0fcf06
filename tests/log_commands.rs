use crate::common::project::{
    commit_all, dated_identities, empty_project, open_repository, project_path, write_file,
};
use crate::common::{git_stdout, run_git_command};
use appvcs::commands::plumbing::commit_tree::CommitTreeParams;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
#[case(1)]
#[case(4)]
#[tokio::test]
async fn history_lists_linear_commits_newest_first(empty_project: TempDir, #[case] count: i64) {
    let dir = project_path(&empty_project);
    let repository = open_repository(&dir);

    let mut expected = Vec::new();
    for i in 1..=count {
        write_file(&dir, &format!("file{i}.txt"), &format!("Content {i}"));
        let oid = commit_all(&repository, &format!("Commit {i}"), dated_identities(i * 60)).await;
        expected.push(oid);
    }
    expected.reverse();

    let history = repository.history().await.unwrap();

    let oids: Vec<_> = history.iter().map(|commit| commit.oid().clone()).collect();
    assert_eq!(oids, expected);
    let messages: Vec<_> = history.iter().map(|commit| commit.short_message()).collect();
    let expected_messages: Vec<_> = (1..=count).rev().map(|i| format!("Commit {i}")).collect();
    assert_eq!(messages, expected_messages);
    assert!(history.last().unwrap().parents().is_empty());
}

#[rstest]
#[tokio::test]
async fn history_follows_first_parent_only(empty_project: TempDir) {
    let dir = project_path(&empty_project);
    let repository = open_repository(&dir);
    write_file(&dir, "a.txt", "a");
    let base = commit_all(&repository, "base", dated_identities(0)).await;

    // a side commit that only the merge knows about
    write_file(&dir, "b.txt", "b");
    let side = commit_all(&repository, "side", dated_identities(60)).await;
    repository.update_ref("HEAD", &base, Some(&side)).await.unwrap();

    let tree = repository.parse_commit(&side).await.unwrap().tree_oid().clone();
    let merge = repository
        .commit_tree(
            CommitTreeParams::new(tree, "merge")
                .parents([base.clone(), side.clone()])
                .identities(dated_identities(120)),
        )
        .await
        .unwrap();
    repository.update_ref("HEAD", &merge, Some(&base)).await.unwrap();

    let history = repository.history().await.unwrap();

    let messages: Vec<_> = history.iter().map(|commit| commit.short_message()).collect();
    assert_eq!(messages, vec!["merge", "base"]);
}

#[rstest]
#[tokio::test]
async fn history_without_commits_is_not_found(empty_project: TempDir) {
    let repository = open_repository(&project_path(&empty_project));

    let error = repository.history().await.unwrap_err();

    assert!(error.is_not_found(), "{error:?}");
}

#[rstest]
#[tokio::test]
async fn corrupt_parent_aborts_the_walk(empty_project: TempDir) {
    let dir = project_path(&empty_project);
    let repository = open_repository(&dir);
    write_file(&dir, "a.txt", "a");
    let good = commit_all(&repository, "good", dated_identities(0)).await;
    let blob = git_stdout(&dir, &["rev-parse", "HEAD:a.txt"]);
    let tree = git_stdout(&dir, &["rev-parse", "HEAD^{tree}"]);

    // a commit whose parent is not a commit at all
    let raw = format!(
        "tree {tree}\nparent {blob}\nauthor A <a@example.com> 1700000000 +0000\ncommitter A <a@example.com> 1700000000 +0000\n\nbroken\n"
    );
    let output = run_git_command(
        &dir,
        &["hash-object", "-t", "commit", "-w", "--literally", "--stdin"],
    )
    .write_stdin(raw)
    .output()
    .unwrap();
    assert!(output.status.success());
    let broken = String::from_utf8(output.stdout).unwrap().trim().to_string();
    run_git_command(&dir, &["update-ref", "HEAD", &broken, good.as_ref()])
        .assert()
        .success();

    let outcome = repository.history().await;

    assert!(outcome.is_err(), "{outcome:?}");
}
