//! Golden file runner. Every `<name>.json` file of a directory is given to a function and its
//! output is compared with `<name>.expect`. When the expectation does not exist yet it is written
//! with the current output, so new cases are added by dropping a program in the directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;

pub struct Test {
    pub directory: &'static str,
    pub run: fn(source: String) -> String,
}

/// Splits `name.ext` into its stem and extension.
pub fn split_name(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let typ = path.extension()?.to_string_lossy().into_owned();
    Some((stem, typ))
}

fn programs(directory: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(directory)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", directory.display()));

    entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file())
        .filter(|path| matches!(split_name(path), Some((_, typ)) if typ == "json"))
        .sorted()
        .collect()
}

/// Runs every program of the directory and panics listing all the ones whose output changed.
pub fn test_runner(test: &Test) {
    let mut failures = Vec::new();
    let programs = programs(Path::new(test.directory));

    assert!(!programs.is_empty(), "no programs in {}", test.directory);

    for path in programs {
        let content = fs::read_to_string(&path).unwrap();
        let result = (test.run)(content);
        let expect = path.with_extension("expect");

        match fs::read_to_string(&expect) {
            Ok(expects) if expects.trim_end() == result.trim_end() => {}
            Ok(expects) => failures.push(format!(
                "{}\n  expected:\n{}\n  found:\n{}",
                path.display(),
                expects.trim_end(),
                result.trim_end()
            )),
            Err(_) => fs::write(&expect, format!("{}\n", result.trim_end())).unwrap(),
        }
    }

    assert!(
        failures.is_empty(),
        "{} failing programs:\n\n{}",
        failures.len(),
        failures.join("\n\n")
    );
}

/// Declares a test that runs the golden files of a directory relative to the crate root.
#[macro_export]
macro_rules! mk_test {
    ($name:ident, $directory:literal, $code:expr) => {
        #[test]
        fn $name() {
            $crate::test_runner(&$crate::Test {
                directory: concat!(env!("CARGO_MANIFEST_DIR"), $directory),
                run: $code,
            });
        }
    };
}
