// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Helper for setting up test directories with JPEG and other files.

use std::{
  collections::HashSet,
  env,
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use super::create_jpeg;

static TEST_ROOT: LazyLock<PathBuf> =
  LazyLock::new(|| env::temp_dir().join(format!("{}_tests", env!("CARGO_PKG_NAME"))));

/// Helper for creating directories for tests needing actual files.
pub struct TestDir {
  root: PathBuf,
}

impl TestDir {
  /// Creates a new directory under `TEST_ROOT` for tests involving file
  /// operations. Files ending in `.jpg`/`.jpeg` (any case) get a real JPEG,
  /// names ending in `/` become directories, anything else gets text.
  /// Note: Prefer using `test_dir!()` macro.
  pub fn new(test_path: PathBuf, files: Vec<&'static str>) -> Self {
    let root_rel = TEST_ROOT.join(test_path);
    if root_rel.exists() {
      fs::remove_dir_all(&root_rel).unwrap();
    }
    fs::create_dir_all(&root_rel).unwrap();

    let root = root_rel.canonicalize().unwrap();

    for file in files {
      create_file(&root, file);
    }

    Self { root }
  }

  /// All regular files under the root, recursively.
  pub fn files(&self) -> HashSet<PathBuf> {
    traverse_dir(&self.root)
  }

  pub fn get_path(&self, file: impl AsRef<Path>) -> PathBuf {
    self.root.join(file)
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

fn create_file(working_dir: impl AsRef<Path>, path: &str) {
  let full_path = working_dir.as_ref().join(path);

  assert!(!full_path.exists(), "File already exists: {full_path:?}");

  if path.ends_with('/') {
    fs::create_dir_all(&full_path).unwrap();
    return;
  }
  fs::create_dir_all(full_path.parent().unwrap()).unwrap();

  let is_jpeg = full_path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

  if is_jpeg {
    create_jpeg(&full_path);
  } else {
    fs::write(&full_path, format!("not an image: {path}\n")).unwrap();
  }
}

fn traverse_dir(root: impl AsRef<Path>) -> HashSet<PathBuf> {
  let mut dirs = vec![root.as_ref().to_owned()];
  let mut files = HashSet::new();

  while let Some(dir) = dirs.pop() {
    for entry in fs::read_dir(dir).unwrap().map(Result::unwrap) {
      let file_type = entry.file_type().unwrap();
      if file_type.is_dir() {
        dirs.push(entry.path());
      } else if file_type.is_file() {
        files.insert(entry.path());
      } else {
        panic!("Unexpected file type: {file_type:?}");
      }
    }
  }

  files
}

#[macro_export]
macro_rules! test_path {
  () => {{
    // HACK: Get module hierarchy for caller.
    let mut function = $crate::testing::type_of(|| ()).rsplit("::");
    // 0th element is `{closure}`.
    let case = function.nth(1).unwrap();
    let suite = function.next().unwrap();
    let module = function.next().unwrap();

    std::path::PathBuf::from(format!("{module}/{suite}/{case}"))
  }};
}

#[macro_export]
macro_rules! test_dir {
  ($($file:literal),* $(,)?) => {{
    TestDir::new(test_path!(), vec![$($file),*])
  }};
}
