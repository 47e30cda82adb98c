//! End-to-end flattening of barrel files on disk

use super::fixtures::Project;
use barrel_file_utils::{
    models::config::{QuoteStyle, Settings},
    parsers::ast_parser::ModuleParser,
    unbarrel, UnbarrelError,
};
use pretty_assertions::assert_eq;

/// Flatten `index.ts` of a fresh project and return its new contents
fn flatten(files: &[(&str, &str)]) -> String {
    let project = Project::new(files);
    unbarrel(&project.path("index.ts"), &Settings::default()).expect("unbarrel");
    project.read("index.ts")
}

fn flatten_err(files: &[(&str, &str)]) -> (UnbarrelError, String, String) {
    let project = Project::new(files);
    let before = project.read("index.ts");
    let err = unbarrel(&project.path("index.ts"), &Settings::default()).unwrap_err();
    (err, before, project.read("index.ts"))
}

#[test]
fn test_external_wildcards_are_kept() {
    let output = flatten(&[
        (
            "index.ts",
            "
        export * from 'react';
        export * from './ux';
        ",
        ),
        (
            "ux/index.ts",
            "
          export * from './client';
          export * from './server';
          ",
        ),
        (
            "ux/client.ts",
            "
          export { createRoot } from 'react-dom/client';
          ",
        ),
        (
            "ux/server.ts",
            "
          import { renderToPipeableStream } from 'react-dom/server';
          export { renderToPipeableStream };
          ",
        ),
    ]);

    assert_eq!(
        output,
        "export * from 'react';\n\
         export { createRoot } from 'react-dom/client';\n\
         export { renderToPipeableStream } from 'react-dom/server';"
    );
}

#[test]
fn test_named_re_export_from_external_package() {
    let output = flatten(&[
        (
            "index.ts",
            "
        export { useEffect } from './ux';
        ",
        ),
        (
            "ux/index.ts",
            "
          export { useState, useEffect } from 'react';
          ",
        ),
    ]);

    assert_eq!(output, "export { useEffect } from 'react';");
}

#[test]
fn test_wildcard_of_declarations() {
    let output = flatten(&[
        ("index.ts", "export * from './add';"),
        (
            "add.ts",
            "
        export function add(a: number, b: number): number {
          return a + b;
        }
        export const addConst = 42;",
        ),
    ]);

    assert_eq!(output, "export { add, addConst } from './add';");
}

#[test]
fn test_typescript_declarations() {
    let output = flatten(&[
        ("index.ts", "export * from './add';"),
        (
            "add.ts",
            "
        export function add(a: number, b: number): number {
          return a + b;
        }
        export interface AddInterface {
          (a: number, b: number): number;
        }
        export type AddType = (a: number, b: number) => number;

        export enum AddEnum {
         One = 'one',
         Two = 'two',
         Three = 'three',
        }",
        ),
    ]);

    assert_eq!(
        output,
        "export { add, type AddInterface, type AddType, AddEnum } from './add';"
    );
}

const ADD_MODULE: &str = "
          export function add(a: number, b: number): number {
            return a + b;
          }

          export interface AddInterface {
            (a: number, b: number): number;
          }";

#[test]
fn test_nested_wildcards() {
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        ("math/index.ts", "\n          export * from './add';\n          "),
        ("math/add.ts", ADD_MODULE),
    ]);

    assert_eq!(output, "export { add, type AddInterface } from './math/add';");
}

#[test]
fn test_wildcard_over_named_barrel() {
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        (
            "math/index.ts",
            "\n          export { add, type AddInterface  } from './add';\n          ",
        ),
        ("math/add.ts", ADD_MODULE),
    ]);

    assert_eq!(output, "export { add, type AddInterface } from './math/add';");
}

#[test]
fn test_only_re_exported_names_are_captured() {
    let add_module = format!(
        "{}
          export function add2(input: number): number {{
            return input + 2;
          }}
          export interface Add2Interface {{
            (input: number): number;
          }}",
        ADD_MODULE
    );
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        (
            "math/index.ts",
            "\n          export { add, type AddInterface  } from './add';\n          ",
        ),
        ("math/add.ts", &add_module),
    ]);

    assert_eq!(output, "export { add, type AddInterface } from './math/add';");
}

#[test]
fn test_rename_chains() {
    let output = flatten(&[
        (
            "index.ts",
            "
        export * from './math';
        export { addType } from './mathTypes';
        ",
        ),
        (
            "math/index.ts",
            "
          export { add as renamedAdd  } from './add';
          export { fakeDivide as realDivide } from './divide';
          ",
        ),
        (
            "math/add.ts",
            "
          export function add(a: number, b: number): number {
            return a + b;
          }
          ",
        ),
        (
            "math/divide/index.ts",
            "\n            export { phonyDivide as fakeDivide } from './divide';",
        ),
        (
            "math/divide/divide/index.ts",
            "\n              export { divide as phonyDivide } from './divide';",
        ),
        (
            "math/divide/divide/divide.ts",
            "
              export function divide(a: number, b: number): number {
                return a / b;
              }
              ",
        ),
        (
            "mathTypes/index.ts",
            "
          export { addTypeBeforeRename as addType } from './addTypes';
          ",
        ),
        (
            "mathTypes/addTypes.ts",
            "
          export type addTypeBeforeRename = (a: number, b: number) => number;
          ",
        ),
    ]);

    assert_eq!(
        output,
        "export { add as renamedAdd } from './math/add';\n\
         export { divide as realDivide } from './math/divide/divide/divide';\n\
         export { addTypeBeforeRename as addType } from './mathTypes/addTypes';"
    );
}

#[test]
fn test_default_exports() {
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        (
            "math/index.ts",
            "
          export { default as add, addConst }from './add';
          export { fakeDivide as realDivide } from './divide';
          ",
        ),
        (
            "math/add.ts",
            "
          export default function add(a: number, b: number): number {
            return a + b;
          }

          export const addConst = 42;
          ",
        ),
        (
            "math/divide/index.ts",
            "\n            export { phonyDivide as fakeDivide } from './divide';",
        ),
        (
            "math/divide/divide/index.ts",
            "\n              export { default as phonyDivide } from './divide';",
        ),
        (
            "math/divide/divide/divide.ts",
            "
              export default class {
                constructor(private a: number, private b: number) {}
                public divide(): number {
                  return this.a / this.b;
                }
              }
              ",
        ),
    ]);

    assert_eq!(
        output,
        "export { default as add, addConst } from './math/add';\n\
         export { default as realDivide } from './math/divide/divide/divide';"
    );
}

#[test]
fn test_source_less_export_lists() {
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        (
            "math/index.ts",
            "
          export * from './add';
          export * from './divide';
          ",
        ),
        (
            "math/add.ts",
            "
          function add(a: number, b: number): number {
            return a + b;
          }

          export const addConst = 42;

          export { add as renamedAdd };

          ",
        ),
        (
            "math/divide/index.ts",
            "\n            export * from './divide';\n            ",
        ),
        (
            "math/divide/divide/index.ts",
            "
              import { divide as phonyDivide, divideConst1, divideConst2 as secondDivideConst, thirdDivideConst, default as defaultDivideConst} from './divide';

              export { phonyDivide as realDivide, divideConst1 as firstDivideConst, secondDivideConst, thirdDivideConst, defaultDivideConst };",
        ),
        (
            "math/divide/divide/divide.ts",
            "
              export function divide(a: number, b: number): number {
                return a / b;
              }

              const divideConst1 = 100;
              const divideConst2 = 200;
              const divideConst3 = 300;

              const defaultConst = 8;

              export default defaultConst;

              export { divideConst1, divideConst2, divideConst3 as thirdDivideConst };
              ",
        ),
    ]);

    assert_eq!(
        output,
        "export { addConst, renamedAdd } from './math/add';\n\
         export { divide as realDivide, divideConst1 as firstDivideConst, divideConst2 as secondDivideConst, thirdDivideConst, default as defaultDivideConst } from './math/divide/divide/divide';"
    );
}

#[test]
fn test_function_overloads_export_once() {
    let output = flatten(&[
        ("index.ts", "\n        export * from './math';\n        "),
        (
            "math.ts",
            "
          export function increment(a:number): number;
          export function increment(a: number, b?: number | undefined): number {
            return a + (b ?? 0);
          }
        ",
        ),
    ]);

    assert_eq!(output, "export { increment } from './math';");
}

#[test]
fn test_renamed_local_through_barrel() {
    let output = flatten(&[
        ("index.ts", "\n        export { renamedAdd } from './math';\n        "),
        ("math/index.ts", "\n          export { renamedAdd } from './add'\n          "),
        (
            "math/add.ts",
            "
          const add = (a: number, b: number) => {
            return a + b;
          }

          export { add as renamedAdd }
          ",
        ),
    ]);

    assert_eq!(output, "export { renamedAdd } from './math/add';");
}

#[test]
fn test_explicit_export_shadows_wildcard_path() {
    let output = flatten(&[
        (
            "index.ts",
            "
        export { add } from './add';
        export * from './math';
        ",
        ),
        (
            "add.ts",
            "
        export function add(a: number, b: number): number {
          return a + b;
        }
        ",
        ),
        (
            "math.ts",
            "
        export { add } from './add';

        export function subtract(a: number, b: number): number {
          return a - b;
        }
        ",
        ),
    ]);

    assert_eq!(
        output,
        "export { add } from './add';\nexport { subtract } from './math';"
    );
}

#[test]
fn test_empty_export_list() {
    let output = flatten(&[("index.ts", "\n        export {};\n        ")]);

    assert_eq!(output, "export {};");
}

#[test]
fn test_parent_directory_imports() {
    let output = flatten(&[
        ("index.ts", "\n         export { add } from './math';\n        "),
        ("math/index.ts", "\n          export { add } from './add';\n          "),
        (
            "math/add.ts",
            "
          import { getConst, add } from '../addFolder';
          export { add };
          ",
        ),
        ("addFolder/index.ts", "\n          export * from './addSubfolder';"),
        (
            "addFolder/addSubfolder/index.ts",
            "\n            export { add } from './addDefinition';\n            ",
        ),
        (
            "addFolder/addSubfolder/addDefinition.ts",
            "
            export function add(a: number, b: number): number {
              return a + b;
            }

            export function getConst(): number {
              return 42;
            }
            ",
        ),
    ]);

    assert_eq!(
        output,
        "export { add } from './addFolder/addSubfolder/addDefinition';"
    );
}

#[test]
fn test_type_and_value_exports_merge_per_module() {
    let output = flatten(&[
        (
            "index.ts",
            "
         export * from './math';
         export * from './ux';
         export type { renderToString } from 'react-dom/server';
        ",
        ),
        (
            "ux/index.ts",
            "
          export type { useState } from 'react'
          export { useEffect } from 'react';
          export { type createRoot, hydrateRoot } from 'react-dom/client';
          ",
        ),
        (
            "math/index.ts",
            "
          export { add } from './add';
          export type { AddFunction } from './add';
          export { subtract, type SubtractFunction } from './subtract';
          ",
        ),
        (
            "math/add.ts",
            "
          export function add(a: number, b: number): number {
            return a + b;
          }

          export type AddFunction = (a: number, b: number) => number;
          ",
        ),
        (
            "math/subtract.ts",
            "
          export function subtract(a: number, b: number): number {
            return a - b;
          }
          export type SubtractFunction = (a: number, b: number) => number;
          ",
        ),
    ]);

    assert_eq!(
        output,
        "export { add, type AddFunction } from './math/add';\n\
         export { subtract, type SubtractFunction } from './math/subtract';\n\
         export { type useState, useEffect } from 'react';\n\
         export { type createRoot, hydrateRoot } from 'react-dom/client';\n\
         export { type renderToString } from 'react-dom/server';"
    );
}

#[test]
fn test_type_and_value_with_same_name() {
    let output = flatten(&[
        ("index.ts", "\n         export * from './math';\n        "),
        ("math/index.ts", "\n          export * from './add';\n          "),
        (
            "math/add.ts",
            "

          export type Add = (a: number, b: number) => number;
          export function Add(a: number, b: number): number {
            return a + b;
          }
          ",
        ),
    ]);

    assert_eq!(output, "export { Add } from './math/add';");
}

#[test]
fn test_flattening_is_idempotent() {
    let project = Project::new(&[
        ("index.ts", "export * from './math';"),
        ("math/index.ts", "export * from './add';\nexport * from './subtract';"),
        ("math/add.ts", "export const add = 1;\nexport type Add = number;"),
        ("math/subtract.ts", "export function subtract() {}"),
    ]);
    let index = project.path("index.ts");

    let first = unbarrel(&index, &Settings::default()).unwrap();
    assert!(first.changed());
    let flattened = project.read("index.ts");

    let second = unbarrel(&index, &Settings::default()).unwrap();
    assert!(!second.changed());
    assert_eq!(project.read("index.ts"), flattened);
}

#[test]
fn test_non_export_statements_are_preserved() {
    let output = flatten(&[
        (
            "index.ts",
            "import './polyfills';\nexport * from './add';\nconst local = 1;\nexport { local };",
        ),
        ("polyfills.ts", ""),
        ("add.ts", "export const add = 1;"),
    ]);

    assert_eq!(
        output,
        "import './polyfills';\nexport { add } from './add';\nexport { local };\nconst local = 1;"
    );
}

#[test]
fn test_double_quote_style() {
    let project = Project::new(&[
        ("index.ts", "export * from './add';"),
        ("add.ts", "export const add = 1;"),
    ]);
    let settings = Settings {
        quote_style: QuoteStyle::Double,
        ..Settings::default()
    };

    unbarrel(&project.path("index.ts"), &settings).unwrap();

    assert_eq!(project.read("index.ts"), "export { add } from \"./add\";");
}

#[test]
fn test_string_export_names_stay_parsable() {
    let project = Project::new(&[
        ("index.ts", "export * from './a';"),
        (
            "a.ts",
            "const v = 1; export { v as \"x\\ry\", v as \"p\\u2028q\", v as \"it's\" };",
        ),
    ]);
    let index = project.path("index.ts");

    let first = unbarrel(&index, &Settings::default()).unwrap();
    assert!(first.changed());
    assert_eq!(first.exports, 3);
    assert!(ModuleParser::new().layout(&index).is_ok());

    let second = unbarrel(&index, &Settings::default()).unwrap();
    assert!(!second.changed());
}

#[test]
fn test_unresolved_module_leaves_file_untouched() {
    let (err, before, after) = flatten_err(&[
        ("index.ts", "export * from './missing';"),
    ]);

    assert!(matches!(err, UnbarrelError::UnresolvedModule { .. }));
    assert_eq!(before, after);
}

#[test]
fn test_unresolved_export_leaves_file_untouched() {
    let (err, before, after) = flatten_err(&[
        ("index.ts", "export { nope } from './add';"),
        ("add.ts", "export const add = 1;"),
    ]);

    match err {
        UnbarrelError::UnresolvedExport { names, .. } => assert_eq!(names, vec!["nope".to_string()]),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(before, after);
}

#[test]
fn test_named_cycle_is_reported() {
    let (err, before, after) = flatten_err(&[
        ("index.ts", "export { a } from './one';"),
        ("one.ts", "export { a } from './two';"),
        ("two.ts", "export { a } from './one';"),
    ]);

    assert!(matches!(err, UnbarrelError::AmbiguousReExport { .. }));
    assert_eq!(before, after);
}

#[test]
fn test_parse_error_is_reported() {
    let (err, before, after) = flatten_err(&[
        ("index.ts", "export * from './broken';"),
        ("broken.ts", "export const = ;"),
    ]);

    assert!(matches!(err, UnbarrelError::Parse { .. }));
    assert_eq!(before, after);
}
