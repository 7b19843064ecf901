use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_walk_empty_dir_prints_root() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("elysius")?;
    let output = cmd.arg("walk").arg(dir.path()).assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec![dir.path().to_str().unwrap()]);

    Ok(())
}

#[test]
fn test_walk_with_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::File::create(dir.path().join("file1.txt"))?;
    std::fs::File::create(dir.path().join("file2.txt"))?;

    for mode in [None, Some("--async")] {
        let mut cmd = Command::cargo_bin("elysius")?;
        cmd.arg("walk").arg(dir.path()).arg("--no-dirs");
        if let Some(flag) = mode {
            cmd.arg(flag);
        }
        let output = cmd.assert().success();

        let stdout = String::from_utf8(output.get_output().stdout.clone())?;
        assert_eq!(stdout.lines().count(), 2);
        assert!(stdout.contains("file1.txt"));
        assert!(stdout.contains("file2.txt"));
    }

    Ok(())
}

#[test]
fn test_walk_max_depth() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let subdir = tempfile::tempdir_in(dir.path())?;
    std::fs::File::create(subdir.path().join("file.txt"))?;

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("walk")
        .arg(dir.path())
        .arg("--max-depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("file.txt").not());

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("walk")
        .arg(dir.path())
        .arg("--max-depth")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("file.txt"));

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("walk")
        .arg(dir.path())
        .arg("--max-depth")
        .arg("-1")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_walk_long_format_and_exclude() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("target"))?;
    std::fs::File::create(dir.path().join("target").join("build.log"))?;
    std::fs::File::create(dir.path().join("main.rs"))?;

    let mut cmd = Command::cargo_bin("elysius")?;
    let output = cmd
        .arg("walk")
        .arg(dir.path())
        .arg("--long")
        .arg("--exclude")
        .arg("*/target")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.lines().next().unwrap_or_default().starts_with("d "));
    assert!(stdout.contains(&format!("f {}", dir.path().join("main.rs").display())));
    assert!(!stdout
        .lines()
        .any(|line| line.ends_with("target") || line.ends_with("build.log")));

    Ok(())
}

#[test]
fn test_walk_debug_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::File::create(dir.path().join("test.txt"))?;

    let mut cmd = Command::cargo_bin("elysius")?;
    let output = cmd.arg("--debug").arg("walk").arg(dir.path()).assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("test.txt"));
    let stderr = String::from_utf8(output.get_output().stderr.clone())?;
    assert!(stderr.contains("DEBUG"));

    Ok(())
}

#[test]
fn test_walk_not_a_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("plain.txt");
    std::fs::File::create(&file)?;

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("walk")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error walking path"));

    Ok(())
}

#[test]
fn test_walk_invalid_pattern_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("walk")
        .arg(dir.path())
        .arg("--exclude")
        .arg("[")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_symlink_handling() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        let dir = tempdir()?;
        std::fs::create_dir(dir.path().join("real"))?;
        std::fs::File::create(dir.path().join("real").join("inner.txt"))?;
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link"))?;

        let mut cmd = Command::cargo_bin("elysius")?;
        let output = cmd.arg("walk").arg(dir.path()).arg("--long").assert().success();
        let stdout = String::from_utf8(output.get_output().stdout.clone())?;
        assert!(stdout.contains(&format!("l {}", dir.path().join("link").display())));
        assert!(!stdout.contains(&dir.path().join("link").join("inner.txt").display().to_string()));

        let mut cmd = Command::cargo_bin("elysius")?;
        let output = cmd
            .arg("walk")
            .arg(dir.path())
            .arg("--long")
            .arg("--follow-symlinks")
            .assert()
            .success();
        let stdout = String::from_utf8(output.get_output().stdout.clone())?;
        assert!(stdout.contains(&format!("d {}", dir.path().join("link").display())));
        assert!(stdout.contains(&dir.path().join("link").join("inner.txt").display().to_string()));
    }
    Ok(())
}

#[test]
fn test_symlink_loop() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        let dir = tempdir()?;
        std::fs::create_dir(dir.path().join("sub"))?;
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("back"))?;

        let mut cmd = Command::cargo_bin("elysius")?;
        cmd.arg("walk")
            .arg(dir.path())
            .arg("--follow-symlinks")
            .assert()
            .failure()
            .stderr(predicate::str::contains("symlink loop"));
    }
    Ok(())
}

#[test]
fn test_find_in_ancestor() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let deep = dir.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&deep)?;
    std::fs::write(dir.path().join("a").join("marker.json"), "{}")?;

    for mode in [None, Some("--async")] {
        let mut cmd = Command::cargo_bin("elysius")?;
        cmd.arg("find").arg("marker.json").arg("--cwd").arg(&deep);
        if let Some(flag) = mode {
            cmd.arg(flag);
        }
        cmd.assert().success().stdout(predicate::str::contains(
            dir.path().join("a").join("marker.json").display().to_string(),
        ));
    }

    Ok(())
}

#[test]
fn test_find_respects_stop() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let deep = dir.path().join("a").join("b");
    std::fs::create_dir_all(&deep)?;
    std::fs::write(dir.path().join("a").join("marker.json"), "{}")?;

    let mut cmd = Command::cargo_bin("elysius")?;
    cmd.arg("find")
        .arg("marker.json")
        .arg("--cwd")
        .arg(&deep)
        .arg("--stop")
        .arg(dir.path().join("a"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_find_contains_predicate() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let deep = dir.path().join("a").join("b");
    std::fs::create_dir_all(&deep)?;
    std::fs::write(deep.join("package.json"), r#"{"name":"b"}"#)?;
    std::fs::write(dir.path().join("a").join("package.json"), r#"{"version":"1.0.0"}"#)?;

    for mode in [None, Some("--async")] {
        let mut cmd = Command::cargo_bin("elysius")?;
        cmd.arg("find")
            .arg("package.json")
            .arg("--cwd")
            .arg(&deep)
            .arg("--contains")
            .arg("version");
        if let Some(flag) = mode {
            cmd.arg(flag);
        }
        cmd.assert().success().stdout(predicate::str::contains(
            dir.path().join("a").join("package.json").display().to_string(),
        ));
    }

    Ok(())
}
