//! CLI smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn zone_command_classifies_categories() {
    Command::cargo_bin("oe")
        .unwrap()
        .args(["zone", "denim jacket", "sundress", "thingamajig"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("denim jacket -> outerwear")
                .and(predicate::str::contains("sundress -> one_piece"))
                .and(predicate::str::contains("thingamajig -> accessories")),
        );
}

#[test]
fn turn_command_requires_api_key() {
    Command::cargo_bin("oe")
        .unwrap()
        .env_remove("ANTHROPIC_API_KEY")
        .args(["turn", "--message", "a blouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}
