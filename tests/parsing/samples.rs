#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use backolon::formatting::unparse;
    use backolon::parsing;

    fn sources(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{:?} directory missing", dir);

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("bk")
            {
                files.push(path);
            }
        }
        files.sort();

        assert!(!files.is_empty(), "No .bk files found in {:?}", dir);
        files
    }

    #[test]
    fn ensure_samples_round_trip() {
        let mut failures = Vec::new();

        for file in sources(Path::new("tests/samples/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            match parsing::parse(&content, &file.to_string_lossy()) {
                Ok(tree) => {
                    if unparse(&tree) != content {
                        println!("File {:?} did not render back to its source", file);
                        failures.push(file.clone());
                    }
                }
                Err(e) => {
                    println!("File {:?} failed to parse: {}", file, e);
                    failures.push(file.clone());
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse and round trip, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let mut unexpected_successes = Vec::new();

        for file in sources(Path::new("tests/broken/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            if parsing::parse(&content, &file.to_string_lossy()).is_ok() {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should not parse successfully, but {} files passed",
                unexpected_successes.len()
            );
        }
    }
}
