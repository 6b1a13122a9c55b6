use pbix_lineage::core::ContainerScanner;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    fs::write(p, "PK").unwrap();
}

#[test]
fn scanner_matches_extension_case_insensitively_and_recursively() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("finance/q1")).unwrap();
    fs::create_dir_all(root.join("ops")).unwrap();

    touch(root.join("top.pbix"));
    touch(root.join("finance/q1/Budget.PBIX"));
    touch(root.join("ops/Ops.Pbix"));
    touch(root.join("ops/template.pbit")); // ignored
    touch(root.join("ops/notes.pbix.txt")); // ignored
    fs::create_dir_all(root.join("folder.pbix")).unwrap(); // directories are ignored

    let mut names: Vec<_> = ContainerScanner::default()
        .scan_directory(root)
        .iter()
        .map(|f| f.file_name())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Budget.PBIX", "Ops.Pbix", "top.pbix"]);
}

#[test]
fn scanner_accepts_dotted_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    touch(dir.path().join("template.PBIT"));
    touch(dir.path().join("report.pbix"));

    let scanner = ContainerScanner::new(".pbit");
    assert_eq!(scanner.extension(), "pbit");
    let files = scanner.scan_directory(dir.path());
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "template.PBIT");
}
