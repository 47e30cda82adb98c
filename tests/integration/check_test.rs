//! Barrel issue detection on disk

use super::fixtures::Project;
use barrel_file_utils::{check, models::config::Settings, BarrelIssue};
use pretty_assertions::assert_eq;

fn issues(files: &[(&str, &str)]) -> Vec<BarrelIssue> {
    let project = Project::new(files);
    check(&project.path("index.ts"), &Settings::default())
        .expect("check")
        .issues
}

fn reference(name: &str, path: &str) -> BarrelIssue {
    BarrelIssue::BarrelFileReference {
        exported_name: name.to_string(),
        barrel_file_path: path.to_string(),
    }
}

#[test]
fn test_empty_export_list_has_no_issues() {
    assert_eq!(
        issues(&[
            ("index.ts", "export {} from \"./test\";"),
            ("test.ts", "export const test = 1;"),
        ]),
        vec![]
    );
}

#[test]
fn test_direct_re_export_has_no_issues() {
    assert_eq!(
        issues(&[
            ("index.ts", "export { test } from \"./test\";"),
            ("test.ts", "export const test = 1;"),
        ]),
        vec![]
    );
}

#[test]
fn test_references_to_other_barrels() {
    let found = issues(&[
        (
            "index.ts",
            "
      export { test } from \"./test\";
      export { barrelFileExport, anotherBarrelFileExport } from \"./barrelFileReference\";
      ",
        ),
        ("test.ts", "export const test = 1;"),
        (
            "barrelFileReference/index.ts",
            "
      export { barrelFileExport, anotherBarrelFileExport } from \"./barrelFileReference\";
      export * from \"./anotherBarrelFileReference\";
        ",
        ),
        (
            "barrelFileReference/barrelFileReference.ts",
            "
      export const barrelFileExport = 12;
      export const anotherBarrelFileReference = 34;
      ",
        ),
        (
            "barrelFileReference/anotherBarrelFileReference.ts",
            "
      export const anotherBarrelFileExport = 34;
      ",
        ),
    ]);

    assert_eq!(
        found,
        vec![
            reference("barrelFileExport", "./barrelFileReference/index.ts"),
            reference("anotherBarrelFileExport", "./barrelFileReference/index.ts"),
        ]
    );
}

#[test]
fn test_external_packages_are_not_reported() {
    assert_eq!(
        issues(&[
            (
                "index.ts",
                "
      export { useEffect } from \"react\";
      export { createRoot } from \"./createRoot\";
      ",
            ),
            (
                "createRoot.ts",
                "\n      export { createRoot } from \"react-dom/client\";",
            ),
        ]),
        vec![]
    );
}

#[test]
fn test_only_forwarded_names_are_inspected() {
    assert_eq!(
        issues(&[
            ("index.ts", "\n      export { test } from \"./test\";\n      "),
            (
                "test.ts",
                "
      export const test = 1;
      export { barrelFileReference } from \"./barrelFileReference\";
      ",
            ),
            (
                "barrelFileReference/index.ts",
                "
        export { barrelFileReference, anotherBarrelFileReference } from \"./barrelFileReference\";
      ",
            ),
        ]),
        vec![]
    );
}

#[test]
fn test_export_all_is_an_issue() {
    let project = Project::new(&[
        ("index.ts", "\n      export * from \"./test\";\n      "),
        (
            "test.ts",
            "
      export const test = 1;
      export { barrelFileReference } from \"./barrelFileReference\";
      ",
        ),
    ]);

    let report = check(&project.path("index.ts"), &Settings::default()).unwrap();

    assert!(report.has_issues());
    match report.issues.as_slice() {
        [BarrelIssue::ExportAll { module, specifier }] => {
            assert!(module.ends_with("index.ts"));
            assert_eq!(specifier, "./test");
        }
        other => panic!("unexpected issues {:?}", other),
    }
}

#[test]
fn test_check_does_not_modify_file() {
    let project = Project::new(&[
        ("index.ts", "export * from './add';"),
        ("add.ts", "export const add = 1;"),
    ]);

    check(&project.path("index.ts"), &Settings::default()).unwrap();

    assert_eq!(project.read("index.ts"), "export * from './add';");
}
