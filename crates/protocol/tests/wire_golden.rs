//! Golden wire-format tests.
//!
//! The files under `tests/golden/` are captured server responses. If one of
//! these tests fails, fix the types, not the vectors.

use std::path::PathBuf;

use quire_protocol::{
    AccessLevel, Ack, CodeTargets, CompileOutput, LoginSuccess, PdfTargets, ProjectList,
    RemoteErrorKind, Response,
};
use serde::de::DeserializeOwned;

fn golden<T: DeserializeOwned>(filename: &str) -> Response<T> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(filename);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Cannot read {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("Cannot parse {}: {}", path.display(), e))
}

#[test]
fn test_login_ok() {
    let login: LoginSuccess = golden("login_ok.json").into_result().unwrap();
    assert_eq!(login.user_info.user_id, "u1");
    assert_eq!(login.user_info.user_email, "ada@lab.example");
    assert_eq!(login.identity.csrf_token, "tok-1");
}

#[test]
fn test_login_bad_password() {
    let err = golden::<LoginSuccess>("login_bad_password.json").into_result().unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Unauthorized);
    assert_eq!(err.user_message(), Some("Your email or password is incorrect."));
}

#[test]
fn test_projects_ok_mixed_field_spellings() {
    let list: ProjectList = golden("projects_ok.json").into_result().unwrap();
    assert_eq!(list.projects.len(), 2);

    let thesis = &list.projects[0];
    assert_eq!(thesis.id, "p1");
    assert_eq!(thesis.source, AccessLevel::Owner);
    assert_eq!(thesis.archived, Some(false));
    assert_eq!(
        thesis.last_updated_by.as_ref().and_then(|u| u.first_name.as_deref()),
        Some("Ada")
    );

    let notes = &list.projects[1];
    assert_eq!(notes.id, "p2");
    assert_eq!(notes.source, AccessLevel::Collaborator);
    assert!(notes.last_updated_by.is_none());
    assert!(notes.trashed.is_none());
}

#[test]
fn test_compile_ok() {
    let out: CompileOutput = golden("compile_ok.json").into_result().unwrap();
    assert_eq!(out.status, "success");
    assert_eq!(out.compile_group.as_deref(), Some("standard"));
    assert_eq!(out.output_files.len(), 2);
    assert_eq!(out.pdf().map(|f| f.build.as_str()), Some("18f"));
}

#[test]
fn test_bare_success_and_bare_error() {
    assert!(golden::<Ack>("delete_ok.json").into_result().is_ok());

    let err = golden::<Ack>("rename_conflict.json").into_result().unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Conflict);
    assert!(err.message.is_none());
}

#[test]
fn test_sync_payloads() {
    let pdf: PdfTargets = golden("sync_code_ok.json").into_result().unwrap();
    assert_eq!(pdf.pdf.len(), 1);
    assert_eq!(pdf.pdf[0].page, 2);

    let code: CodeTargets = golden("sync_pdf_ok.json").into_result().unwrap();
    let best = code.into_best().unwrap();
    assert_eq!(best.file, "chapters/intro.tex");
    assert_eq!(best.line, 42);
    assert_eq!(best.column, -1);
}

#[test]
fn test_success_envelope_serializes_flat() {
    let resp: Response<Ack> = Response::Success(Ack {});
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "success" }));
}
