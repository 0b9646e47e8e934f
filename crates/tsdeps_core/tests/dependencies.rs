use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tsdeps_core::{DependencyProvider, get_dependencies, load_config_for};

const SAMPLE_IMPORTS: &str = r#"
import ClassA from "./package-a/module-a";
import * as moduleB from "./package-a/module-b";
import {ClassC} from "./package-a/module-c";
import {ClassD as Foo} from "./package-b/module-d";
import {ClassE1, ClassE2} from "./package-b/module-e";
import {ClassF1, ClassF2 as ClassF42} from "./package-b/module-f";
import ClassG1, { ClassG2 } from "./package-b/package-b2/module-g";
import ClassH1, * as moduleH from "./package-b/package-b2/module-h";
import ClassI1 from "./package-b/package-b2/module-i";
import moduleJ = require('./package-b/package-b2/module-j');
"#;

const SAMPLE_FILES: &[&str] = &[
    "package-a/module-a.ts",
    "package-a/module-b.ts",
    "package-a/module-c.js",
    "package-b/module-d.ts",
    "package-b/module-e.ts",
    "package-b/module-f.ts",
    "package-b/package-b2/module-g.js",
    "package-b/package-b2/module-h.js",
    "package-b/package-b2/module-i.ts",
    "package-b/package-b2/module-j.js",
];

fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

fn create_sample_app(src_dir: &Path, extra_imports: &str) -> PathBuf {
    for file in SAMPLE_FILES {
        create_test_file(src_dir, file, "export default {};");
    }
    create_test_file(src_dir, "sample.ts", &format!("{SAMPLE_IMPORTS}{extra_imports}"))
}

#[test]
fn test_module_without_tsconfig() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app-without-tsconfig");
    let sample = create_sample_app(&app, "");

    assert!(load_config_for(&app).is_empty());
    let deps = get_dependencies(&sample).unwrap();
    assert_eq!(deps, SAMPLE_FILES);
}

#[test]
fn test_module_with_mapped_paths() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app-with-mapped-paths");
    create_test_file(
        &app,
        "tsconfig.json",
        r#"
{
  "compilerOptions": {
    "target": "es5",
    // aliases resolve against the project root
    "baseUrl": ".",
    "paths": {
      "@/*": ["src/*"]
    }
  }
}
"#,
    );
    let src = app.join("src");
    create_test_file(&src, "plugins/vuetify.ts", "export default {};");
    create_test_file(&src, "package-a/App.component.vue", "<template></template>");
    let sample = create_sample_app(
        &src,
        "import vuetify from \"@/plugins/vuetify\";\n\
         import App from \"@/package-a/App.component.vue\";\n\
         import Vue from \"vue\";\n",
    );

    let deps = get_dependencies(&sample).unwrap();
    let mut expected: Vec<&str> = SAMPLE_FILES.to_vec();
    expected.push("plugins/vuetify.ts");
    expected.push("package-a/App.component.vue");
    assert_eq!(deps, expected);
}

#[test]
fn test_mapping_to_sibling_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(
        root,
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": "./", "paths": { "@shared/*": ["libs/shared/*"] } } }"#,
    );
    create_test_file(root, "libs/shared/format.ts", "");
    let entry = create_test_file(root, "apps/web/main.ts", "import { fmt } from '@shared/format';");

    assert_eq!(get_dependencies(&entry).unwrap(), vec!["../../libs/shared/format.ts"]);
}

#[test]
fn test_mapping_falls_back_to_default_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(
        root,
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
    );
    create_test_file(root, "src/local.ts", "");
    let entry = create_test_file(
        root,
        "src/main.ts",
        "import '@/missing';\nimport './local';",
    );

    assert_eq!(get_dependencies(&entry).unwrap(), vec!["local.ts"]);
}

#[test]
fn test_type_only_and_re_exports_are_dependencies() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "types.ts", "export interface T {}");
    create_test_file(root, "api.ts", "export const api = 1;");
    let entry = create_test_file(
        root,
        "index.ts",
        "import type { T } from './types';\nexport * from './api';",
    );

    assert_eq!(get_dependencies(&entry).unwrap(), vec!["types.ts", "api.ts"]);
}

#[test]
fn test_commented_imports_are_not_dependencies() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "a.ts", "");
    create_test_file(root, "b.ts", "");
    let entry = create_test_file(
        root,
        "index.ts",
        "// import './b';\n/*\nimport './b';\n*/\nimport './a';",
    );

    assert_eq!(get_dependencies(&entry).unwrap(), vec!["a.ts"]);
}

#[test]
fn test_results_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    let sample = create_sample_app(&app, "import missing from './nope';\n");

    let provider = DependencyProvider::new();
    let first = provider.get_dependencies(&sample).unwrap();
    let second = provider.get_dependencies(&sample).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), SAMPLE_FILES.len());
}

#[test]
fn test_provider_is_shareable_across_threads() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    let sample = create_sample_app(&app, "");
    let provider = DependencyProvider::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| provider.get_dependencies(&sample).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), SAMPLE_FILES);
        }
    });
}

#[test]
fn test_precondition_violation() {
    let temp_dir = TempDir::new().unwrap();
    let err = get_dependencies(&temp_dir.path().join("missing.ts")).unwrap_err();
    assert!(err.to_string().contains("not an existing regular file"));
}
