use std::path::Path;

use zodforge_compiler::{Compiler, CompilerConfig, CompilerError};

fn compiler(output: &Path) -> Compiler {
    Compiler::new(CompilerConfig {
        metadata: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blog.dmmf.json"),
        output: output.to_path_buf(),
        ..CompilerConfig::default()
    })
}

#[test]
fn compile_writes_every_unit() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("schemas");

    let result = compiler(&output).compile().unwrap();

    assert_eq!(result.files_pruned, 0);
    assert_eq!(
        result.files_written,
        result.stats.enums + result.stats.objects + result.stats.operations + 1
    );
    assert!(output.join("index.ts").is_file());
    assert!(output.join("enums/Role.schema.ts").is_file());
    assert!(output.join("objects/UserWhereInput.schema.ts").is_file());
    assert!(output.join("UserFindMany.schema.ts").is_file());
}

#[test]
fn recompiling_leaves_unchanged_files_alone() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("schemas");
    let compiler = compiler(&output);

    compiler.compile().unwrap();
    let first = std::fs::read_to_string(output.join("objects/UserInclude.schema.ts")).unwrap();

    let second_run = compiler.compile().unwrap();
    let second = std::fs::read_to_string(output.join("objects/UserInclude.schema.ts")).unwrap();

    assert_eq!(second_run.files_written, 0);
    assert_eq!(first, second);
}

#[test]
fn stale_schema_modules_are_pruned() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("schemas");
    let compiler = compiler(&output);
    compiler.compile().unwrap();

    let stale = output.join("objects/CommentWhereInput.schema.ts");
    let unrelated = output.join("README.md");
    std::fs::write(&stale, "export {};\n").unwrap();
    std::fs::write(&unrelated, "notes\n").unwrap();

    let result = compiler.compile().unwrap();

    assert_eq!(result.files_pruned, 1);
    assert!(!stale.exists());
    assert!(unrelated.exists());
    assert!(output.join("objects/UserWhereInput.schema.ts").exists());
}

#[test]
fn check_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("schemas");

    let stats = compiler(&output).check().unwrap();

    assert_eq!(stats.operations, 24);
    assert!(!output.exists());
}

#[test]
fn unwritable_module_reports_its_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("schemas");
    let blocked = output.join("index.ts");
    std::fs::create_dir_all(&blocked).unwrap();

    let err = compiler(&output).compile().unwrap_err();

    match err {
        CompilerError::IoError { path, .. } => assert_eq!(path, blocked),
        other => panic!("expected an IO error, got {:?}", other),
    }
}
