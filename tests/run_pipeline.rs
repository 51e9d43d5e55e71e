// tests/run_pipeline.rs

#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use common::{MailingWorkspace, cli_args, init_tracing};
use mailgate::errors::{MailgateError, ProcessFailure};
use mailgate::fs::RealFileSystem;
use mailgate::run_with;

// Writing a script and exec'ing it while another test thread forks can
// fail with ETXTBSY; serialise the tests that spawn fake mailers.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Write a fake mailer that records its arguments and the credential it
/// was handed, then runs `tail` (shell code).
fn fake_mailer(ws: &MailingWorkspace, tail: &str) -> PathBuf {
    let args_out = ws.path("args.txt");
    let cred_out = ws.path("credential.txt");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nif [ -n \"$SERVICE_ACCOUNT_JSON\" ]; then cat \"$SERVICE_ACCOUNT_JSON\" > '{cred}'; echo >> '{cred}'; echo \"$SERVICE_ACCOUNT_JSON\" >> '{cred}'; fi\n{}\n",
        args_out.display(),
        tail,
        cred = cred_out.display(),
    );
    let path = ws.write("fake-mailer.sh", script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn recorded_args(ws: &MailingWorkspace) -> Vec<String> {
    fs::read_to_string(ws.path("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn mailer_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn successful_run_passes_flags_to_mailer() {
    init_tracing();
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let mailer = fake_mailer(&ws, "exit 0");
    let args = cli_args(&["--mailer", &mailer_arg(&mailer)]);

    run_with(builder.no_send_mode("True").build(), &RealFileSystem, &args)
        .await
        .unwrap();

    let recorded = recorded_args(&ws);
    assert_eq!(recorded[0], "mail");
    assert_eq!(recorded[1..3], ["--sendgrid-api-key", "SG.test-key"]);
    assert_eq!(recorded.last().map(String::as_str), Some("--no-send-mode"));
}

#[tokio::test]
async fn failing_mailer_is_reported_with_stderr() {
    init_tracing();
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let mailer = fake_mailer(&ws, "echo 'quota exceeded' >&2\nexit 2");
    let args = cli_args(&["--mailer", &mailer_arg(&mailer)]);

    let err = run_with(builder.build(), &RealFileSystem, &args)
        .await
        .unwrap_err();
    match err {
        MailgateError::ExternalProcessFailure(ProcessFailure::NonZeroExit { code, stderr }) => {
            assert_eq!(code, Some(2));
            assert_eq!(stderr, "quota exceeded");
        }
        other => panic!("expected ExternalProcessFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn inline_credential_reaches_mailer_and_is_cleaned_up() {
    init_tracing();
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let mailer = fake_mailer(&ws, "exit 0");
    let args = cli_args(&["--mailer", &mailer_arg(&mailer)]);
    let credential = r#"{"type":"service_account","project_id":"demo"}"#;

    run_with(builder.service_account(credential).build(), &RealFileSystem, &args)
        .await
        .unwrap();

    let seen = fs::read_to_string(ws.path("credential.txt")).unwrap();
    let mut lines = seen.lines();
    assert_eq!(lines.next(), Some(credential));
    let temp_path = PathBuf::from(lines.next().unwrap());
    assert!(!temp_path.exists(), "temporary credential outlived the run");
}

#[tokio::test]
async fn timeout_kills_mailer() {
    init_tracing();
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let mailer = fake_mailer(&ws, "sleep 10");
    let args = cli_args(&["--mailer", &mailer_arg(&mailer), "--timeout", "1"]);

    let err = run_with(builder.build(), &RealFileSystem, &args)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MailgateError::ExternalProcessFailure(ProcessFailure::TimedOut(_))
    ));
}

#[tokio::test]
async fn dry_run_does_not_execute() {
    init_tracing();
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let args = cli_args(&["--dry-run", "--mailer", "/nonexistent/mailer"]);

    run_with(builder.build(), &RealFileSystem, &args).await.unwrap();
    assert!(!ws.path("args.txt").exists());
}

#[tokio::test]
async fn validation_failure_never_runs_mailer() {
    init_tracing();
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (ws, builder) = MailingWorkspace::valid().unwrap();
    let mailer = fake_mailer(&ws, "exit 0");
    let args = cli_args(&["--mailer", &mailer_arg(&mailer)]);

    let err = run_with(
        builder.passwords(ws.path("missing.json")).build(),
        &RealFileSystem,
        &args,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MailgateError::MissingPasswordsFile(_)));
    assert!(!ws.path("args.txt").exists());
}
