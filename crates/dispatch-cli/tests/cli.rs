use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

struct TestDb {
    _dir: TempDir,
    url: String,
}

impl TestDb {
    fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("dispatch.db").display());
        Self { _dir: dir, url }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("dispatch").expect("Binary not found");
        cmd.env("DATABASE_URL", &self.url)
            .env_remove("DISPATCH_USER_PASSWORD")
            .env_remove("RUST_LOG");
        cmd
    }

    fn migrated() -> Self {
        let db = Self::new();
        db.command().arg("migrate").assert().success();
        db
    }
}

#[test]
fn test_migrate_is_idempotent() {
    let db = TestDb::new();

    db.command()
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied"));

    db.command()
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_add_and_dump_users() {
    let db = TestDb::migrated();

    db.command()
        .args(["add-user", "Jane Manager", "jane@example.com", "manager", "--phone", "+1234567890"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User created successfully!"))
        .stdout(predicate::str::contains("Phone:   +1234567890"));

    db.command()
        .args(["add-user", "John Doe", "john@example.com", "worker", "--inactive"])
        .assert()
        .success();

    db.command()
        .arg("dump-users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Users: 2"))
        .stdout(predicate::str::contains("Phone:   N/A"))
        .stdout(predicate::str::contains("Active:  false"));
}

#[test]
fn test_add_user_rejects_duplicates_and_bad_roles() {
    let db = TestDb::migrated();

    db.command()
        .args(["add-user", "Jane", "jane@example.com", "worker"])
        .assert()
        .success();

    db.command()
        .args(["add-user", "Other Jane", "JANE@example.com", "worker"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Email already registered"));

    db.command()
        .args(["add-user", "Root", "root@example.com", "superadmin"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("role"));
}

#[test]
fn test_seed_runs_once() {
    let db = TestDb::new();

    db.command()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 5 demo user(s)."));

    db.command()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing seeded"));

    db.command()
        .args(["dump-users", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@example.com"));
}
