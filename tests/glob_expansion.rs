// tests/glob_expansion.rs

mod common;
use crate::common::{init_tracing, pattern_in, set};

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use watchdo::errors::WatchdoError;
use watchdo::fs::mock::MockFileSystem;
use watchdo::watch::GlobManager;

type TestResult = Result<(), Box<dyn Error>>;

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("bob.py", "print('bob')");
    fs.add_file("top.py", "");
    fs.add_file("src/a.py", "");
    fs.add_file("src/notes.txt", "");
    fs.add_file("src/sub/b.py", "");
    fs.add_file("src/sub/deep/c.py", "");
    fs.add_dir("src/pkg.py");
    fs
}

#[test]
fn duplicate_patterns_collapse_to_one_file() -> TestResult {
    init_tracing();
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["bob.py", "bob.py"])?;

    assert_eq!(globs.get_files(), set(&["bob.py"]));
    Ok(())
}

#[test]
fn overlapping_patterns_are_deduplicated() -> TestResult {
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["src/*.py", "src/a.*", "*.py"])?;

    assert_eq!(globs.get_files(), set(&["bob.py", "src/a.py", "top.py"]));
    Ok(())
}

#[test]
fn single_star_does_not_cross_directories() -> TestResult {
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["src/*.py"])?;

    assert_eq!(globs.get_files(), set(&["src/a.py"]));
    Ok(())
}

#[test]
fn double_star_recurses_into_subdirectories() -> TestResult {
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["src/**/*.py"])?;

    assert_eq!(
        globs.get_files(),
        set(&["src/a.py", "src/sub/b.py", "src/sub/deep/c.py"])
    );
    Ok(())
}

#[test]
fn leading_double_star_matches_from_current_directory() -> TestResult {
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["**/*.py"])?;
    let files = globs.get_files();

    // Relative patterns produce relative paths, without a "./" prefix.
    assert!(files.contains(&PathBuf::from("top.py")));
    assert!(files.contains(&PathBuf::from("src/sub/deep/c.py")));
    assert!(files.iter().all(|p| !p.starts_with(".")));
    Ok(())
}

#[test]
fn directories_are_never_returned() -> TestResult {
    let fs = Arc::new(project());

    // `src/pkg.py` is a directory that happens to look like a file.
    let mut globs = GlobManager::with_fs(fs, ["src/pkg.py", "src/pkg*", "src"])?;

    assert!(globs.get_files().is_empty());
    Ok(())
}

#[test]
fn missing_literal_path_matches_nothing() -> TestResult {
    let fs = Arc::new(project());

    let mut globs = GlobManager::with_fs(fs, ["does/not/exist.py", "nowhere/*.py"])?;

    assert!(globs.get_files().is_empty());
    Ok(())
}

#[test]
fn last_files_tracks_the_latest_expansion() -> TestResult {
    let mock = project();
    let fs = Arc::new(mock.clone());

    let mut globs = GlobManager::with_fs(fs, ["src/*.py"])?;
    assert!(globs.last_files().is_empty());

    globs.get_files();
    assert_eq!(globs.last_files(), &set(&["src/a.py"]));

    mock.add_file("src/z.py", "");
    mock.remove("src/a.py");
    globs.get_files();
    assert_eq!(globs.last_files(), &set(&["src/z.py"]));
    Ok(())
}

#[test]
fn malformed_pattern_is_rejected_up_front() {
    let fs = Arc::new(project());

    let err = GlobManager::with_fs(fs, ["src/*.py", "src/[abc"]).unwrap_err();

    match err {
        WatchdoError::Glob { pattern, .. } => assert_eq!(pattern, "src/[abc"),
        other => panic!("expected a glob error, got {other:?}"),
    }
}

#[test]
fn absolute_patterns_on_the_real_filesystem() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("nested/more"))?;
    fs::write(dir.path().join("one.txt"), "1")?;
    fs::write(dir.path().join("two.md"), "2")?;
    fs::write(dir.path().join("nested/three.txt"), "3")?;
    fs::write(dir.path().join("nested/more/four.txt"), "4")?;

    let mut flat = GlobManager::new([pattern_in(dir.path(), "*.txt")])?;
    assert_eq!(
        flat.get_files().into_iter().collect::<Vec<_>>(),
        vec![dir.path().join("one.txt")]
    );

    let mut deep = GlobManager::new([pattern_in(dir.path(), "**/*.txt")])?;
    let files = deep.get_files();
    assert_eq!(files.len(), 3);
    assert!(files.contains(&dir.path().join("nested/more/four.txt")));
    assert!(!files.contains(&dir.path().join("two.md")));
    Ok(())
}

fn with_dotfiles() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("a.py", "");
    fs.add_file(".hidden.py", "");
    fs.add_file(".venv/lib/site.py", "");
    fs.add_file(".git/config", "");
    fs.add_file("src/.cache/x.py", "");
    fs.add_file("src/b.py", "");
    fs
}

#[test]
fn wildcards_skip_hidden_files_and_directories() -> TestResult {
    let fs = Arc::new(with_dotfiles());

    let mut all = GlobManager::with_fs(fs.clone(), ["**/*"])?;
    assert_eq!(all.get_files(), set(&["a.py", "src/b.py"]));

    let mut py = GlobManager::with_fs(fs.clone(), ["**/*.py"])?;
    assert_eq!(py.get_files(), set(&["a.py", "src/b.py"]));

    let mut flat = GlobManager::with_fs(fs, ["*"])?;
    assert_eq!(flat.get_files(), set(&["a.py"]));
    Ok(())
}

#[test]
fn hidden_names_match_when_the_pattern_spells_the_dot() -> TestResult {
    let fs = Arc::new(with_dotfiles());

    let mut dotfiles = GlobManager::with_fs(fs.clone(), [".*.py"])?;
    assert_eq!(dotfiles.get_files(), set(&[".hidden.py"]));

    let mut venv = GlobManager::with_fs(fs.clone(), [".v*/**/*.py"])?;
    assert_eq!(venv.get_files(), set(&[".venv/lib/site.py"]));

    let mut nested = GlobManager::with_fs(fs.clone(), ["src/.c*/*.py"])?;
    assert_eq!(nested.get_files(), set(&["src/.cache/x.py"]));

    // A literal path is taken as-is.
    let mut literal = GlobManager::with_fs(fs, [".git/config"])?;
    assert_eq!(literal.get_files(), set(&[".git/config"]));
    Ok(())
}
