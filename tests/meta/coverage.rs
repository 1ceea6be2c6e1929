//! Checks that every source file has a mirrored unit test file and vice versa

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module declarations carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn relative_rust_paths(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        walk(base, base, &mut found)?;
        Ok(found)
    }

    fn walk(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_prefix| io::Error::other("path escaped its base directory"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                found.insert(relative);
                walk(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn report(header: &str, missing: &[&String], from: &str, to: &str) -> String {
        let lines: Vec<String> = missing
            .iter()
            .map(|path| format!("  - {from}/{path} -> {to}/{path}"))
            .collect();
        format!("{header}:\n{}", lines.join("\n"))
    }

    // Tests every source file has a unit test counterpart
    // Verified by deleting a unit test file
    #[test]
    fn test_src_files_have_unit_tests() {
        let sources = relative_rust_paths(Path::new(SRC_DIR)).unwrap();
        let tests = relative_rust_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let missing: Vec<&String> = sources
            .iter()
            .filter(|path| !is_exempt(path) && !tests.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit tests", &missing, SRC_DIR, UNIT_DIR)
        );
    }

    // Tests every unit test file mirrors a source file
    // Verified by adding a stray unit test file
    #[test]
    fn test_unit_tests_have_src_files() {
        let sources = relative_rust_paths(Path::new(SRC_DIR)).unwrap();
        let tests = relative_rust_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<&String> = tests
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without source files", &orphaned, UNIT_DIR, SRC_DIR)
        );
    }

    // Tests each unit test file declares at least one test
    // Verified by emptying a unit test file
    #[test]
    fn test_unit_test_files_contain_tests() {
        let tests = relative_rust_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let empty: Vec<&String> = tests
            .iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(Path::new(UNIT_DIR).join(path.as_str()))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Unit test files without tests", &empty, UNIT_DIR, UNIT_DIR)
        );
    }
}
